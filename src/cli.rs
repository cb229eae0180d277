use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::billing::BillInputs;
use crate::config::DEFAULT_CONFIG_PATH;

/// 결과 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Toml,
}

/// 두 실행 파일이 공유하는 옵션.
#[derive(Debug, Clone, clap::Args)]
pub struct CommonArgs {
    /// Path to the TOML config file with the allocation policy and labels.
    #[clap(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug).
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Tenant electricity invoice calculator.
///
/// With no readings given, an interactive prompt is started.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Total utility bill energy (KW).
    #[clap(long = "total-kw", allow_hyphen_values = true)]
    pub total_kw: Option<String>,

    /// Total utility cost (NIS).
    #[clap(long = "total-nis", allow_hyphen_values = true)]
    pub total_nis: Option<String>,

    /// Machine meter reading (KW), excluded from the general pool.
    #[clap(long = "machine-kw", allow_hyphen_values = true)]
    pub machine_kw: Option<String>,

    /// Tenant sub-meter reading (KW).
    #[clap(long = "tenant-kw", allow_hyphen_values = true)]
    pub tenant_kw: Option<String>,

    /// Output format for a one-shot calculation.
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    #[clap(flatten)]
    pub common: CommonArgs,
}

impl Args {
    /// 검침값 옵션이 하나라도 있으면 입력 레코드를 만든다. 빠진 필드는 빈 문자열이다.
    pub fn inputs(&self) -> Option<BillInputs> {
        let fields = [&self.total_kw, &self.total_nis, &self.machine_kw, &self.tenant_kw];
        if fields.iter().all(|f| f.is_none()) {
            return None;
        }
        Some(BillInputs::new(
            self.total_kw.clone().unwrap_or_default(),
            self.total_nis.clone().unwrap_or_default(),
            self.machine_kw.clone().unwrap_or_default(),
            self.tenant_kw.clone().unwrap_or_default(),
        ))
    }
}

/// Desktop invoice form.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about)]
pub struct GuiArgs {
    #[clap(flatten)]
    pub common: CommonArgs,
}
