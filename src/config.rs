use std::path::PathBuf;

use serde::Deserialize;

use crate::fmt::RecordFormat;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCfg {
    #[serde(default)]
    pub records: RawRecordsCfg,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RawRecordsCfg {
    pub from: Option<String>,
    pub to: Option<String>,
    pub increment: Option<bool>,
    pub tag_match: Option<String>,
    pub tag_exclude: Option<String>,
    pub sentinel: Option<String>,
    pub include_merges: bool,
    pub git_dir: Option<PathBuf>,
    pub git_work_tree: Option<PathBuf>,
    pub outfile: Option<String>,
    pub output_format: Option<RecordFormat>,
}
