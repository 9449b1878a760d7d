use serde::{Serialize, Deserialize};

use crate::args;
use crate::targets::MethodEnum;

/// Targets stage target.
/// Contains the method used to generate the field evaluation points.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetsTarget {
    /// Target point method, tagged with its `name` and optional `args`.
    pub method: MethodEnum,
}
impl TargetsTarget {
    /// Construct a targets stage target from a config file.
    pub fn from_cfg_file(cfg_file: &str) -> args::ProcResult<Self> {
        let target: TargetsTarget = crate::io::read_cfg_file(cfg_file)?;
        Ok(target)
    }

    /// Example target with the given method, used for printing a config template.
    pub fn example(method: MethodEnum) -> Self {
        TargetsTarget{method}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_each_format() {
        let dir = tempfile::tempdir().unwrap();

        let yaml = dir.path().join("targets.yaml");
        crate::io::write_to_file(&yaml, "method:\n  name: sphere_grid\n  args:\n    n: 3\n").unwrap();
        let target = TargetsTarget::from_cfg_file(yaml.to_str().unwrap()).unwrap();
        assert_eq!(target.method.arg_name(), "sphere_grid");

        let json = dir.path().join("targets.json");
        crate::io::write_to_file(&json, r#"{"method": {"name": "center", "args": {}}}"#).unwrap();
        let target = TargetsTarget::from_cfg_file(json.to_str().unwrap()).unwrap();
        assert_eq!(target.method.arg_name(), "center");

        let toml = dir.path().join("targets.toml");
        crate::io::write_to_file(&toml, "[method]\nname = \"sphere_grid\"\n[method.args]\nside = 0.2\n").unwrap();
        let target = TargetsTarget::from_cfg_file(toml.to_str().unwrap()).unwrap();
        assert_eq!(target.method.arg_name(), "sphere_grid");
    }

    #[test]
    fn rejects_unknown_method() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("targets.yml");
        crate::io::write_to_file(&yaml, "method:\n  name: cube\n  args: {}\n").unwrap();
        assert!(TargetsTarget::from_cfg_file(yaml.to_str().unwrap()).is_err());
    }
}
