use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tenant_invoice::{app, cli::Args, config, logging, ui_cli::Console};

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 단발 계산 또는 대화형 CLI를 실행한다.
fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.common.verbose);
    match try_run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(args: &Args) -> Result<(), app::AppError> {
    let cfg = config::load_or_default(&args.common.config)?;
    match args.inputs() {
        Some(inputs) => {
            let text = app::run_once(&cfg, &inputs, args.output)?;
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{text}")?;
        }
        None => {
            let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
            app::run(&cfg, &mut console)?;
        }
    }
    Ok(())
}
