use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use serde_json::json;
use wepc_system::WeSystem;

use crate::{emit_json, read_segment};

#[derive(Args, Debug)]
pub struct BinsArgs {
    /// Segment snapshot whose progress coordinate should be binned.
    #[arg(long)]
    pub assign: Option<PathBuf>,
    /// Write the report here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(system: &WeSystem, args: &BinsArgs) -> Result<(), Box<dyn Error>> {
    let mapper = system.bin_mapper();
    let report = match &args.assign {
        Some(path) => {
            let segment = read_segment(path)?;
            let pcoord = segment
                .pcoord
                .as_ref()
                .ok_or("segment has no progress coordinate to bin")?;
            let assignments = mapper.assign_rows(pcoord)?;
            json!({
                "n_iter": segment.n_iter,
                "seg_id": segment.seg_id,
                "assignments": assignments,
                "config_hash": system.config_hash(),
            })
        }
        None => json!({
            "nbins": mapper.nbins(),
            "bins_per_dim": mapper.bins_per_dim(),
            "labels": mapper.labels(),
            "target_counts": system.target_counts().as_slice(),
            "target_total": system.target_counts().total(),
            "config_hash": system.config_hash(),
        }),
    };
    emit_json(args.out.as_deref(), &report)
}
