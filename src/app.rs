use std::io::{BufRead, Write};

use thiserror::Error;
use tracing::info;

use crate::billing::{self, BillInputs, BillingCalculator, BillingError, Invoice};
use crate::cli::OutputFormat;
use crate::config::{Config, ConfigError};
use crate::ui_cli::{self, Console, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 로드 오류
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// 필수 입력 누락
    #[error(transparent)]
    Billing(#[from] BillingError),
    /// 결과 직렬화 오류
    #[error("output error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 대화형 메뉴 루프를 실행한다. 계산기 상태는 루프가 끝날 때까지 유지된다.
pub fn run<R: BufRead, W: Write>(
    config: &Config,
    console: &mut Console<R, W>,
) -> Result<(), AppError> {
    let mut calc = BillingCalculator::new(config.policy);
    loop {
        match ui_cli::main_menu(console, &config.labels)? {
            MenuChoice::Calculate => ui_cli::handle_calculate(console, &mut calc, &config.labels)?,
            MenuChoice::ShowLast => ui_cli::handle_show_last(console, &calc, &config.labels)?,
            MenuChoice::ShowPolicy => {
                ui_cli::handle_show_policy(console, &config.policy, &config.labels)?
            }
            MenuChoice::Exit => {
                info!("exiting");
                break;
            }
        }
    }
    Ok(())
}

/// 옵션으로 받은 검침값을 한 번 계산해 결과 텍스트를 돌려준다.
pub fn run_once(
    config: &Config,
    inputs: &BillInputs,
    output: OutputFormat,
) -> Result<String, AppError> {
    let invoice = billing::calculate(inputs, &config.policy)?;
    render(&invoice, config, output)
}

fn render(invoice: &Invoice, config: &Config, output: OutputFormat) -> Result<String, AppError> {
    match output {
        OutputFormat::Text => Ok(ui_cli::render_invoice(invoice, &config.policy, &config.labels)),
        OutputFormat::Toml => Ok(toml::to_string_pretty(invoice)?),
    }
}
