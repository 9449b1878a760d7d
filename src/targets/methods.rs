/*!
 * This is the target point methods module.
 * Adding new methods should be done here.
 *
 * New methods need:
 * - A struct implementing `TargetMethodTrait` (and `Default`)
 * - An enum variant containing that struct in `MethodEnum`
 * - Its config name in `MethodEnum::arg_name`
 *
 */

use enum_dispatch::enum_dispatch;
use serde::{Serialize, Deserialize};
use strum::EnumIter;

use crate::geo_3d::Point;
use crate::targets;

//
// ------------------------------------------------------------
// Code that requires modification to add a new target method
//      |
//      V
//

// Source files for the target methods
mod sphere_grid;
mod center;

/// Target point methods enum.
/// Serialized with the method name as `name` and its arguments as `args`.
#[derive(Debug, Clone, Serialize, Deserialize, EnumIter)]
#[serde(tag = "name", content = "args", rename_all = "snake_case")]
#[enum_dispatch(TargetMethodTrait)]
pub enum MethodEnum {
    /// Cubic grid clipped to the inscribed sphere.
    SphereGrid(sphere_grid::Method),
    /// A single evaluation point.
    Center(center::Method),
}
impl MethodEnum {
    /// Config name of the method.
    pub fn arg_name(&self) -> &'static str {
        match self {
            MethodEnum::SphereGrid(_) => "sphere_grid",
            MethodEnum::Center(_) => "center",
        }
    }
}

//
// ------------------------------------------------------------
// Traits that don't need modification,
// but are references for adding a new target method
//      |
//      V
//

/// Target method trait.
/// This trait defines the functions that all target point methods must implement.
#[enum_dispatch]
pub trait TargetMethodTrait {
    /// Get the display name of the method.
    fn get_method_name(&self) -> &'static str;

    /// Generate the target points.
    fn generate(&self) -> targets::ProcResult<Vec<Point>>;
}
