/*!
 * Field evaluation points and the field each coil should produce there.
 *
 * Point sets come from the methods in `methods` (selected by name in the
 * targets stage config). The per-axis design presets and the nulling target
 * field live in `axis`.
 */
mod proc_errors;
mod cfg;
mod methods;
mod axis;

use crate::geo_3d::Point;
use crate::store::LoopStore;

// Re-export errors
pub use proc_errors::{
    TargetError,
    ProcResult,
    err_str,
};

// Re-export config
pub use cfg::TargetsTarget;

// Re-export methods
pub use methods::{
    MethodEnum,
    TargetMethodTrait,
};

// Re-export axis presets
pub use axis::{
    CoilAxis,
    CoilDesign,
    UNDESIRED_FIELD_T,
};

/// Generate the target points of a targets stage and save them under the key.
/// Returns the generated points.
pub fn do_targets(target: &TargetsTarget, store: &LoopStore, key: &str) -> ProcResult<Vec<Point>> {
    tracing::info!("Generating target points ({})...", target.method.get_method_name());
    let points = target.method.generate()?;
    if points.is_empty() {
        err_str("Target method produced no points")?;
    }

    let path = store.save_target_points(&points, key)?;
    tracing::info!("Saved {} target points to {}", points.len(), path.display());
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let store = LoopStore::new(dir.path());
        let target: TargetsTarget = serde_yaml::from_str("method:\n  name: center\n  args: {}\n").unwrap();

        let points = do_targets(&target, &store, "Z").unwrap();
        assert_eq!(points, vec![Point::zero()]);
        assert_eq!(store.load_target_points("Z").unwrap(), points);
    }

    #[test]
    fn bad_key_is_a_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = LoopStore::new(dir.path());
        let target: TargetsTarget = serde_yaml::from_str("method:\n  name: center\n  args: {}\n").unwrap();
        assert!(matches!(do_targets(&target, &store, "../Z"), Err(TargetError::StoreError(_))));
    }
}
