use serde::{Serialize, Deserialize};

use crate::geo_3d::Point;
use crate::targets::{self, methods};

/// Center Method struct.
/// A single evaluation point, for quick checks of a coil design.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Method {
    #[serde(default = "Point::zero")]
    point: Point,
}

impl methods::TargetMethodTrait for Method {
    fn get_method_name(&self) -> &'static str {
        "Center"
    }

    fn generate(&self) -> targets::ProcResult<Vec<Point>> {
        if !self.point.is_finite() {
            targets::err_str(&format!("Target point is not finite: {}", self.point))?;
        }
        Ok(vec![self.point])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::methods::TargetMethodTrait;

    #[test]
    fn single_point() {
        assert_eq!(Method::default().generate().unwrap(), vec![Point::zero()]);

        let method: Method = serde_json::from_str(r#"{"point": {"x": 0.0, "y": 0.1, "z": 0.0}}"#).unwrap();
        assert_eq!(method.generate().unwrap(), vec![Point::new(0.0, 0.1, 0.0)]);
    }
}
