use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use log::info;
use wepc_core::{LoadProvenance, Segment};
use wepc_load::{build_loader, LoaderKind};
use wepc_system::WeSystem;

use crate::{emit_json, read_segment};

#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Output file produced by the segment propagator.
    #[arg(long)]
    pub input: PathBuf,
    /// Segment snapshot (JSON) to load into; its stored progress coordinate
    /// supplies the inherited state.
    #[arg(long)]
    pub segment: Option<PathBuf>,
    /// Evaluate a single basis/initial point instead of a full segment.
    #[arg(long)]
    pub single_point: bool,
    /// Field key to store the data under; defaults to the loader's own key.
    #[arg(long)]
    pub field: Option<String>,
    /// Write the updated segment here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(system: &WeSystem, kind: LoaderKind, args: &LoadArgs) -> Result<(), Box<dyn Error>> {
    let mut segment = match &args.segment {
        Some(path) => read_segment(path)?,
        None => Segment::default(),
    };
    let field = args
        .field
        .clone()
        .unwrap_or_else(|| kind.default_field().to_string());

    let loader = build_loader(system, kind);
    loader.load(&field, &args.input, &mut segment, args.single_point)?;
    segment.record_load(LoadProvenance {
        loader: loader.name().to_string(),
        field: field.clone(),
        source: args.input.display().to_string(),
        config_hash: system.config_hash().to_string(),
    });
    info!(
        "{} loaded {} into segment {}/{} field {field}",
        loader.name(),
        args.input.display(),
        segment.n_iter,
        segment.seg_id
    );

    emit_json(args.out.as_deref(), &segment)
}
