pub mod geo_3d;
pub mod windings;
pub mod mesh;
pub mod store;
pub mod targets;
pub mod field;
pub mod args;
pub mod io;
mod crate_errors;

use strum::IntoEnumIterator;

use store::LoopStore;

pub use crate_errors::{
    OpmCoilError,
    OpmCoilResult,
    err_str,
};

/// Targets struct.
/// Contains the stage targets to run, loaded from their config files.
pub struct Targets {
    pub targets_target: Option<targets::TargetsTarget>,
    pub flatten_target: Option<windings::FlattenTarget>,
    pub metrics_target: Option<windings::MetricsTarget>,
    pub shared_args: args::SharedArgs,
}

/// Serialize the example config of a stage, or list the stage's methods if none is given.
pub fn example_config_string(example_args: &args::ExampleArgs) -> OpmCoilResult<String> {
    let format = example_args.format;
    match example_args.stage {
        args::RunStage::Targets => {
            let method_names: Vec<&str> = targets::MethodEnum::iter().map(|m| m.arg_name()).collect();
            let mut available_methods_str = "Available methods:\n".to_string();
            for name in method_names.iter() {
                available_methods_str.push_str(&format!("    {}\n", name));
            }

            let target_method_name = match example_args.method.as_ref() {
                Some(name) => name,
                None => return Ok(available_methods_str),
            };
            match targets::MethodEnum::iter().find(|m| m.arg_name() == target_method_name) {
                Some(method) => Ok(io::cfg_to_string(&targets::TargetsTarget::example(method), format)?),
                None => err_str(&format!("Method \"{}\" not found. {}", target_method_name, available_methods_str)),
            }
        },
        args::RunStage::Flatten | args::RunStage::Metrics if example_args.method.is_some() => {
            err_str(&format!("Stage {} has no methods to choose from", example_args.stage))
        },
        args::RunStage::Flatten => Ok(io::cfg_to_string(&windings::FlattenTarget::example(), format)?),
        args::RunStage::Metrics => Ok(io::cfg_to_string(&windings::MetricsTarget::example(), format)?),
    }
}

/// Display an example config file for a stage.
pub fn example_config(example_args: args::ExampleArgs) -> OpmCoilResult<()> {
    println!("{}", example_config_string(&example_args)?);
    Ok(())
}

/// [Stage 1.]
/// Build the stage targets from the run arguments.
/// Expects a start stage and an optional end stage that must come after the start.
/// For each stage to be run between them, checks for a required corresponding config file.
/// Returns an `OpmCoilResult` with the `Targets` or an `Err`.
pub fn build_targets(cli_args: args::RunArgs) -> OpmCoilResult<Targets> {
    let end_stage = cli_args.end_stage.unwrap_or(cli_args.start_stage);

    if cli_args.start_stage.stage_num() > end_stage.stage_num() {
        args::err_str(&format!("Start stage ({}) is after end stage ({})", cli_args.start_stage, end_stage))?;
    }
    if cli_args.start_stage == end_stage {
        tracing::info!("Stage to run: {}...", cli_args.start_stage);
    } else {
        tracing::info!("Stages to run: {} through {}...", cli_args.start_stage, end_stage);
    }

    let mut targets = Targets{
        targets_target: None,
        flatten_target: None,
        metrics_target: None,
        shared_args: cli_args.shared_args.clone(),
    };

    for stage in args::RunStage::iter() {
        if stage.stage_num() < cli_args.start_stage.stage_num() {
            continue;
        }
        if stage.stage_num() > end_stage.stage_num() {
            break;
        }

        let cfg_file = match cli_args.cfg_for(stage) {
            Some(cfg_file) => cfg_file,
            None => return Err(args::ArgError::StringOnly(format!("Config file for the {} stage not specified (--{}-cfg)", stage, stage)).into()),
        };
        tracing::info!("Loading {} config file: {}...", stage, cfg_file);

        match stage {
            args::RunStage::Targets => {
                targets.targets_target = Some(targets::TargetsTarget::from_cfg_file(cfg_file)?);
            },
            args::RunStage::Flatten => {
                targets.flatten_target = Some(windings::FlattenTarget::from_cfg_file(cfg_file)?);
            },
            args::RunStage::Metrics => {
                targets.metrics_target = Some(windings::MetricsTarget::from_cfg_file(cfg_file)?);
            },
        }
    }

    Ok(targets)
}

/// [Stage 2.]
/// Run the process on the targets, in stage order, against the loop store.
/// Returns an `OpmCoilResult` with `()` or an `Err`.
pub fn run_process(targets: Targets) -> OpmCoilResult<()> {
    let store = LoopStore::new(&targets.shared_args.store_dir);
    let key = targets.shared_args.key.as_str();

    // 2.1 Generate the target points
    if let Some(targets_target) = targets.targets_target {
        tracing::info!("Running targets...");
        targets::do_targets(&targets_target, &store, key)?;
    }

    // 2.2 Flatten the stored loops
    if let Some(flatten_target) = targets.flatten_target {
        tracing::info!("Running flatten...");
        let loops = store.load_loops(key)?;
        let mut layout = windings::FlatLayout::build(
            &loops,
            flatten_target.origin,
            flatten_target.scale,
            flatten_target.offset,
        )?;
        if let Some(bounds) = flatten_target.bounds.as_ref() {
            layout.retain_within(bounds);
            if layout.loops.len() < loops.len() {
                tracing::warn!("Dropped {} of {} loops outside the bounds", loops.len() - layout.loops.len(), loops.len());
            }
        }
        if flatten_target.close_loops {
            layout.close_loops();
        }
        let (front, back) = layout.layer_counts();
        tracing::info!("Flattened {} loops ({} front, {} back)", layout.loops.len(), front, back);
        if let Some(bounds) = layout.bounds() {
            tracing::info!("Layout spans {:.3} x {:.3}", bounds.width(), bounds.height());
        }
        windings::save_flat_layout(&layout, &flatten_target.output_path)?;
    }

    // 2.3 Compute the winding metrics
    if let Some(metrics_target) = targets.metrics_target {
        tracing::info!("Running metrics...");
        let loops = store.load_loops(key)?;
        let metrics = windings::WindingMetrics::compute(&loops, metrics_target.origin, metrics_target.trace);
        println!("{}", metrics);

        if let Some(output_path) = metrics_target.output_path.as_ref() {
            io::write_json(output_path, &metrics)?;
            tracing::info!("Saved metrics to {}", output_path);
        }
    }

    Ok(())
}
