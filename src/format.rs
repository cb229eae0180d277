//! 청구서 화면 표시용 숫자 형식.
//!
//! 계산 결과 자체는 반올림하지 않고, 표시할 때만 자릿수를 맞춘다.

use crate::billing::Invoice;

/// 셰켈 통화 기호.
pub const SHEKEL: &str = "₪";

/// 금액을 천 단위 구분, 소수 둘째 자리까지 셰켈로 표시한다. 예: `1,234.56 ₪`
pub fn currency_nis(value: f64) -> String {
    format!("{} {SHEKEL}", grouped(value, 2))
}

/// 평균 단가를 소수 넷째 자리까지 표시한다. 예: `₪0.5000 / KW`
pub fn rate_per_kw(value: f64) -> String {
    format!("{SHEKEL}{} / KW", fixed(value, 4))
}

/// 전력량을 소수 둘째 자리까지 표시한다. 예: `136.00 KW`
pub fn energy_kw(value: f64) -> String {
    format!("{} KW", fixed(value, 2))
}

/// 계량기 값을 천 단위 구분, 필요한 만큼(최대 셋째 자리)의 소수로 표시한다. 예: `1,250 KW`
pub fn meter_kw(value: f64) -> String {
    if !value.is_finite() {
        return format!("{} KW", non_finite(value));
    }
    let s = grouped(value, 3);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    };
    format!("{s} KW")
}

/// f64의 소수부를 반올림 없이 모두 펼치기에 충분한 자릿수(최대 1074자리).
const EXACT_FRACTION_DIGITS: usize = 1100;

/// 고정 소수 자릿수 표시(구분 기호 없음).
///
/// 이진 값의 정확한 십진 전개를 기준으로 0.5는 0에서 먼 쪽으로 올린다(1.125 → "1.13").
pub fn fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return non_finite(value).to_string();
    }
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let (kept, dropped) = frac_part.split_at(decimals.min(frac_part.len()));

    let mut digits: Vec<u8> = int_part.bytes().chain(kept.bytes()).collect();
    if matches!(dropped.as_bytes().first(), Some(b'5'..=b'9')) {
        increment_digits(&mut digits);
    }

    let split = digits.len() - decimals;
    let mut out = String::with_capacity(digits.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(std::str::from_utf8(&digits[..split]).unwrap_or("0"));
    if decimals > 0 {
        out.push('.');
        out.push_str(std::str::from_utf8(&digits[split..]).unwrap_or("0"));
    }
    out
}

/// 십진 숫자열에 1을 더한다. 자리 올림이 맨 앞을 넘으면 1을 덧붙인다.
fn increment_digits(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

/// 고정 소수 자릿수 + 천 단위 구분 표시.
pub fn grouped(value: f64, decimals: usize) -> String {
    let s = fixed(value, decimals);
    if !value.is_finite() {
        return s;
    }
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };
    let mut out = String::with_capacity(s.len() + int_part.len() / 3);
    out.push_str(sign);
    out.push_str(&group_thousands(int_part));
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn non_finite(value: f64) -> &'static str {
    if value.is_nan() {
        "NaN"
    } else if value > 0.0 {
        "∞"
    } else {
        "-∞"
    }
}

/// 화면에 보여줄 청구서 요약 한 줄씩.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceLines {
    pub amount: String,
    pub rate: String,
    pub direct: String,
    pub shared: String,
    pub billed: String,
}

impl InvoiceLines {
    pub fn new(invoice: &Invoice) -> Self {
        Self {
            amount: currency_nis(invoice.billed_nis),
            rate: rate_per_kw(invoice.rate),
            direct: meter_kw(invoice.direct_kw),
            shared: energy_kw(invoice.shared_allocation_kw),
            billed: energy_kw(invoice.billed_kw),
        }
    }
}

/// 배분 비율을 퍼센트로 표시한다. 예: 0.034 → `3.4%`
pub fn percent(fraction: f64) -> String {
    let s = fixed(fraction * 100.0, 3);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    format!("{s}%")
}
