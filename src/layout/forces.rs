//! The four composed forces of the layout simulation
//!
//! Semantics follow the d3-force model: each force perturbs velocities (or,
//! for centering, positions directly), scaled by the simulation's current
//! alpha; integration happens afterwards in the tick.

use super::simulation::Body;

/// Substitute for a zero distance between coincident bodies.
const JIGGLE: f64 = 1e-6;

/// A link between two bodies by index, with its rest distance.
#[derive(Debug, Clone)]
pub struct Link {
    pub source: usize,
    pub target: usize,
    pub distance: f64,
    /// 1 / min(degree(source), degree(target))
    pub strength: f64,
    /// degree(source) / (degree(source) + degree(target))
    pub bias: f64,
}

/// Pairwise link attraction toward each link's rest distance.
pub fn link(bodies: &mut [Body], links: &[Link], alpha: f64) {
    for l in links {
        let (sx, sy, svx, svy) = {
            let s = &bodies[l.source];
            (s.x, s.y, s.vx, s.vy)
        };
        let t = &bodies[l.target];
        let mut dx = t.x + t.vx - sx - svx;
        let mut dy = t.y + t.vy - sy - svy;
        if dx == 0.0 && dy == 0.0 {
            dx = JIGGLE;
            dy = -JIGGLE;
        }
        let len = dx.hypot(dy);
        let scale = (len - l.distance) / len * alpha * l.strength;
        let fx = dx * scale;
        let fy = dy * scale;

        bodies[l.target].vx -= fx * l.bias;
        bodies[l.target].vy -= fy * l.bias;
        bodies[l.source].vx += fx * (1.0 - l.bias);
        bodies[l.source].vy += fy * (1.0 - l.bias);
    }
}

/// Mutual many-body repulsion with a constant (distance-independent)
/// charge per node. Exact pairwise evaluation; the node sets here are
/// personal-wiki sized, so no tree approximation is needed.
pub fn many_body(bodies: &mut [Body], strength: f64, alpha: f64) {
    let n = bodies.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let mut dx = bodies[j].x - bodies[i].x;
            let mut dy = bodies[j].y - bodies[i].y;
            if dx == 0.0 && dy == 0.0 {
                dx = JIGGLE;
                dy = -JIGGLE;
            }
            let d2 = dx * dx + dy * dy;
            let w = strength * alpha / d2;
            bodies[j].vx += dx * w;
            bodies[j].vy += dy * w;
            bodies[i].vx -= dx * w;
            bodies[i].vy -= dy * w;
        }
    }
}

/// Shift all bodies so their mean position moves toward the given center.
/// Operates on positions directly and ignores alpha, matching d3.
pub fn center(bodies: &mut [Body], cx: f64, cy: f64, strength: f64) {
    if bodies.is_empty() {
        return;
    }
    let n = bodies.len() as f64;
    let mx = bodies.iter().map(|b| b.x).sum::<f64>() / n;
    let my = bodies.iter().map(|b| b.y).sum::<f64>() / n;
    let sx = (mx - cx) * strength;
    let sy = (my - cy) * strength;
    for b in bodies.iter_mut() {
        b.x -= sx;
        b.y -= sy;
    }
}

/// Pairwise collision avoidance with a uniform minimum separation radius.
pub fn collide(bodies: &mut [Body], radius: f64, strength: f64) {
    let n = bodies.len();
    let min_sep = radius * 2.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let mut dx = bodies[j].x + bodies[j].vx - bodies[i].x - bodies[i].vx;
            let mut dy = bodies[j].y + bodies[j].vy - bodies[i].y - bodies[i].vy;
            if dx == 0.0 && dy == 0.0 {
                dx = JIGGLE;
                dy = -JIGGLE;
            }
            let len = dx.hypot(dy);
            if len >= min_sep {
                continue;
            }
            let push = (min_sep - len) / len * strength * 0.5;
            let fx = dx * push;
            let fy = dy * push;
            bodies[j].vx += fx;
            bodies[j].vy += fy;
            bodies[i].vx -= fx;
            bodies[i].vy -= fy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_at(x: f64, y: f64) -> Body {
        Body {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            fx: None,
            fy: None,
        }
    }

    #[test]
    fn link_pulls_distant_bodies_together() {
        let mut bodies = vec![body_at(0.0, 0.0), body_at(300.0, 0.0)];
        let links = vec![Link {
            source: 0,
            target: 1,
            distance: 100.0,
            strength: 1.0,
            bias: 0.5,
        }];
        link(&mut bodies, &links, 1.0);
        assert!(bodies[0].vx > 0.0);
        assert!(bodies[1].vx < 0.0);
    }

    #[test]
    fn link_pushes_close_bodies_apart() {
        let mut bodies = vec![body_at(0.0, 0.0), body_at(10.0, 0.0)];
        let links = vec![Link {
            source: 0,
            target: 1,
            distance: 100.0,
            strength: 1.0,
            bias: 0.5,
        }];
        link(&mut bodies, &links, 1.0);
        assert!(bodies[0].vx < 0.0);
        assert!(bodies[1].vx > 0.0);
    }

    #[test]
    fn negative_charge_repels() {
        let mut bodies = vec![body_at(0.0, 0.0), body_at(10.0, 0.0)];
        many_body(&mut bodies, -300.0, 1.0);
        assert!(bodies[0].vx < 0.0);
        assert!(bodies[1].vx > 0.0);
    }

    #[test]
    fn center_moves_the_mean_exactly() {
        let mut bodies = vec![body_at(0.0, 0.0), body_at(100.0, 0.0)];
        center(&mut bodies, 400.0, 300.0, 1.0);
        let mx = (bodies[0].x + bodies[1].x) / 2.0;
        let my = (bodies[0].y + bodies[1].y) / 2.0;
        assert!((mx - 400.0).abs() < 1e-9);
        assert!((my - 300.0).abs() < 1e-9);
    }

    #[test]
    fn collide_separates_overlapping_bodies() {
        let mut bodies = vec![body_at(0.0, 0.0), body_at(30.0, 0.0)];
        collide(&mut bodies, 60.0, 1.0);
        assert!(bodies[0].vx < 0.0);
        assert!(bodies[1].vx > 0.0);
    }

    #[test]
    fn collide_ignores_separated_bodies() {
        let mut bodies = vec![body_at(0.0, 0.0), body_at(500.0, 0.0)];
        collide(&mut bodies, 60.0, 1.0);
        assert_eq!(bodies[0].vx, 0.0);
        assert_eq!(bodies[1].vx, 0.0);
    }
}
