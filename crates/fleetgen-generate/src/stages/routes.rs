use fleetgen_core::records::Route;
use fleetgen_core::{CITIES, road_distance_km, toll_cost};

use crate::rng::RandomContext;

const VARIANTS_PER_PAIR: usize = 2;
const SIMPLE_NOISE: (f64, f64) = (0.95, 1.05);
const COMPOSITE_NOISE: (f64, f64) = (0.97, 1.03);
const SPEED_KMH: (f64, f64) = (60.0, 80.0);

/// Generate exactly `count` routes.
///
/// Direct city-pair routes come first (two noisy variants per ordered
/// pair), then composite A-B-C and A-B-C-D legs fill up to the target.
/// With the default five cities this yields 40 simple routes and more
/// composites than any realistic target needs.
pub fn generate(count: u64, ctx: &mut RandomContext) -> Vec<Route> {
    let count = count as usize;
    let mut routes = Vec::with_capacity(count);

    'simple: for origin in CITIES {
        for destination in CITIES {
            if origin == destination {
                continue;
            }
            let base_km = road_distance_km(origin, destination);
            if base_km <= 0.0 {
                continue;
            }
            for _ in 0..VARIANTS_PER_PAIR {
                if routes.len() >= count {
                    break 'simple;
                }
                let km = base_km * ctx.uniform(SIMPLE_NOISE.0, SIMPLE_NOISE.1);
                push_route(&mut routes, origin, destination, km, ctx);
            }
        }
    }

    'three_leg: for a in CITIES {
        if routes.len() >= count {
            break;
        }
        for b in CITIES {
            if b == a {
                continue;
            }
            for c in CITIES {
                if c == a || c == b {
                    continue;
                }
                if routes.len() >= count {
                    break 'three_leg;
                }
                let km = (road_distance_km(a, b) + road_distance_km(b, c))
                    * ctx.uniform(COMPOSITE_NOISE.0, COMPOSITE_NOISE.1);
                push_route(&mut routes, a, c, km, ctx);
            }
        }
    }

    'four_leg: for a in CITIES {
        if routes.len() >= count {
            break;
        }
        for b in CITIES {
            if b == a {
                continue;
            }
            for c in CITIES {
                if c == a || c == b {
                    continue;
                }
                for d in CITIES {
                    if d == a || d == b || d == c {
                        continue;
                    }
                    if routes.len() >= count {
                        break 'four_leg;
                    }
                    let km = (road_distance_km(a, b)
                        + road_distance_km(b, c)
                        + road_distance_km(c, d))
                        * ctx.uniform(COMPOSITE_NOISE.0, COMPOSITE_NOISE.1);
                    push_route(&mut routes, a, d, km, ctx);
                }
            }
        }
    }

    routes.truncate(count);
    routes
}

fn push_route(
    routes: &mut Vec<Route>,
    origin: &str,
    destination: &str,
    km: f64,
    ctx: &mut RandomContext,
) {
    let speed = ctx.uniform(SPEED_KMH.0, SPEED_KMH.1);
    let duration = km / speed + 1.0;
    let id = routes.len() as u32 + 1;

    routes.push(Route {
        id,
        code: format!("R{id:03}"),
        origin: origin.to_string(),
        destination: destination.to_string(),
        distance_km: round2(km),
        estimated_duration_hours: round2(duration),
        toll_cost: toll_cost(km),
    });
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_count_default_target() {
        let mut ctx = RandomContext::new(71);
        let routes = generate(50, &mut ctx);
        assert_eq!(routes.len(), 50);
        assert_eq!(routes[0].code, "R001");
        assert_eq!(routes[49].code, "R050");
    }

    #[test]
    fn exact_count_beyond_simple_pairs() {
        // 5 cities give 40 simple variants; anything above needs the
        // composite phases.
        let mut ctx = RandomContext::new(72);
        let routes = generate(90, &mut ctx);
        assert_eq!(routes.len(), 90);
    }

    #[test]
    fn routes_are_internally_consistent() {
        let mut ctx = RandomContext::new(73);
        for route in generate(50, &mut ctx) {
            assert_ne!(route.origin, route.destination);
            assert!(route.distance_km > 0.0);
            // duration = km / speed + 1h with speed in [60, 80]
            assert!(route.estimated_duration_hours > route.distance_km / 80.0 + 0.99);
            assert!(route.estimated_duration_hours < route.distance_km / 60.0 + 1.01);
        }
    }
}
