use std::io::{BufRead, Write};

use crate::app::AppError;
use crate::billing::{AllocationPolicy, BillInputs, BillingCalculator, Invoice};
use crate::config::Labels;
use crate::format::{self, InvoiceLines};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Calculate,
    ShowLast,
    ShowPolicy,
    Exit,
}

/// 프롬프트 입출력 대상. 실제 실행에서는 stdin/stdout, 테스트에서는 버퍼를 쓴다.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, line: &str) -> Result<(), AppError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// 프롬프트를 출력하고 한 줄을 읽는다. 입력이 끝났으면 None.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// 메인 메뉴를 표시하고 선택값을 반환한다. 입력이 끝나면 종료로 본다.
pub fn main_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    labels: &Labels,
) -> Result<MenuChoice, AppError> {
    console.say(&format!("\n=== {} ===", labels.title))?;
    console.say("1) Calculate invoice")?;
    console.say("2) Show last invoice")?;
    console.say("3) Show allocation policy")?;
    console.say("0) Exit")?;
    loop {
        let Some(sel) = console.read_line("Select: ")? else {
            return Ok(MenuChoice::Exit);
        };
        match sel.trim() {
            "1" => return Ok(MenuChoice::Calculate),
            "2" => return Ok(MenuChoice::ShowLast),
            "3" => return Ok(MenuChoice::ShowPolicy),
            "0" => return Ok(MenuChoice::Exit),
            _ => console.say("Invalid input. Please try again.")?,
        }
    }
}

/// 네 검침값을 입력받아 계산한다. 필수값이 빠지면 메시지만 보여주고 이전 결과는 유지한다.
pub fn handle_calculate<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    calc: &mut BillingCalculator,
    labels: &Labels,
) -> Result<(), AppError> {
    console.say("\n-- Calculate invoice --")?;
    let inputs = BillInputs {
        total_energy_kw: prompt_field(console, "Total Utility Bill (KW): ")?,
        total_cost_nis: prompt_field(console, "Total Utility Cost (NIS): ")?,
        machine_energy_kw: prompt_field(console, &format!("{} Meter (KW): ", labels.machine))?,
        tenant_energy_kw: prompt_field(
            console,
            &format!("{} Cabinet Meter (KW): ", labels.tenant),
        )?,
    };
    calc.set_inputs(inputs);
    let policy = *calc.policy();
    match calc.calculate() {
        Ok(invoice) => {
            let text = render_invoice(invoice, &policy, labels);
            console.say(&text)?;
        }
        Err(err) => console.say(&format!("! {err}"))?,
    }
    Ok(())
}

fn prompt_field<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    prompt: &str,
) -> Result<String, AppError> {
    Ok(console.read_line(prompt)?.unwrap_or_default())
}

/// 마지막으로 성공한 계산 결과를 다시 보여준다.
pub fn handle_show_last<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    calc: &BillingCalculator,
    labels: &Labels,
) -> Result<(), AppError> {
    match calc.result() {
        Some(invoice) => {
            let text = render_invoice(invoice, calc.policy(), labels);
            console.say(&text)
        }
        None => console.say("No invoice calculated yet."),
    }
}

pub fn handle_show_policy<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    policy: &AllocationPolicy,
    labels: &Labels,
) -> Result<(), AppError> {
    console.say(&render_policy(policy, labels))
}

/// 청구서를 여러 줄 텍스트로 만든다.
pub fn render_invoice(invoice: &Invoice, policy: &AllocationPolicy, labels: &Labels) -> String {
    let lines = InvoiceLines::new(invoice);
    let mut out = String::new();
    out.push_str(&format!("Amount to Invoice: {}\n", lines.amount));
    out.push_str(&format!("  Avg Rate      {}\n", lines.rate));
    out.push_str(&format!("  Direct Meter  {}\n", lines.direct));
    out.push_str(&format!(
        "  AC Share ({})  {}\n",
        format::percent(policy.tenant_ac_share),
        lines.shared
    ));
    out.push_str(&format!("  Total Billed  {}", lines.billed));
    if invoice.has_negative_allocation() {
        out.push_str(&format!(
            "\n  warning: {} meter exceeds the facility total; the shared allocation is negative",
            labels.machine
        ));
    }
    out
}

pub fn render_policy(policy: &AllocationPolicy, labels: &Labels) -> String {
    format!(
        "AC pool: {} of general consumption (total minus {})\n{} share of AC pool: {}",
        format::percent(policy.ac_pool_fraction),
        labels.machine,
        labels.tenant,
        format::percent(policy.tenant_ac_share),
    )
}
