//! Overlap of two adjacent synthetic survey passes.
//!
//! Usage:
//!   cargo run -p swath-overlap --example overlap_demo
//!   cargo run -p swath-overlap --example overlap_demo -- "PCL ConcaveHull" 30
//!
//! Arguments: hull method name (default "Andrew's"), across-track separation
//! in metres (default 40). Logs at info; stage transitions are at debug.

use swath_overlap::prelude::*;
use swath_overlap::rand::{draw_adjacent_pair, ReplayToken, SwathCfg};
use swath_overlap::survey::SoundVelocityProfile;
use tracing_subscriber::fmt::SubscriberBuilder;

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();

    let mut args = std::env::args().skip(1);
    let method: HullMethod = args.next().as_deref().unwrap_or("Andrew's").parse()?;
    let separation = match args.next() {
        Some(arg) => parse_separation(&arg)?,
        None => 40.0,
    };

    let swath = SwathCfg::default();
    let (line_a, line_b) = draw_adjacent_pair(swath, separation, ReplayToken { seed: 2025, index: 0 });
    let svp = SoundVelocityProfile::salt_water();
    tracing::info!(
        samples_a = line_a.len(),
        samples_b = line_b.len(),
        swath_width = swath.swath_width,
        separation,
        sound_speed = svp.speed_at(swath.depth),
        "synthetic survey"
    );

    let plane = Plane::horizontal(-swath.depth)?;
    let cfg = OverlapCfg {
        hull: method,
        ..OverlapCfg::default()
    };
    let mut engine = OverlapEngine::new(&line_a, &line_b, plane, cfg)?;
    tracing::info!(
        hull = %engine.cfg().hull,
        plane = ?engine.plane().coefficients(),
        "engine ready"
    );
    let result = engine.compute_overlap()?;

    for id in LineId::BOTH {
        let line = result.line(id);
        tracing::info!(
            line = %id,
            against = %id.other(),
            matched = line.count,
            total = engine.line(id).len(),
            hull_vertices = engine.hull_vertices(id).map_or(0, <[_]>::len),
            "line overlap"
        );
    }
    if let (Some(b2), Some(b3)) = (engine.overlap_bounds_2d(), engine.overlap_bounds_3d()) {
        tracing::info!(
            u = ?(b2.min.x, b2.max.x),
            v = ?(b2.min.y, b2.max.y),
            world_min = ?b3.min,
            world_max = ?b3.max,
            "overlap bounds"
        );
    } else {
        tracing::info!("lines do not overlap");
    }
    if let (Some(frame), Some(hull)) = (engine.frame(), engine.hull_vertices(LineId::A)) {
        if let Some(first) = hull.first() {
            tracing::info!(vertex = ?frame.to_world(first), "first hull vertex of line A");
        }
    }
    Ok(())
}

fn parse_separation(arg: &str) -> Result<f64> {
    match arg.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Ok(v) => Err(OverlapError::Configuration(format!(
            "separation must be finite and >= 0, got {v}"
        ))),
        Err(err) => Err(OverlapError::Configuration(format!(
            "separation \"{arg}\" is not a number: {err}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separation_argument_is_validated() {
        assert_eq!(parse_separation("30").unwrap(), 30.0);
        assert_eq!(parse_separation("0").unwrap(), 0.0);
        for bad in ["forty", "", "-5", "inf", "NaN"] {
            assert!(
                matches!(parse_separation(bad), Err(OverlapError::Configuration(_))),
                "{bad:?} was accepted"
            );
        }
    }
}
