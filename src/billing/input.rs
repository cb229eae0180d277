use serde::{Deserialize, Serialize};

/// 입력 폼의 네 필드를 원문 그대로 담는다.
///
/// 값은 키 입력마다 바뀌는 화면 상태이며, 계산 시점에 한 번만 [`BillInputs::parse`]로 읽힌다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillInputs {
    /// 시설 전체 검침 전력량 [KW]
    pub total_energy_kw: String,
    /// 전체 전기 요금 [NIS]
    pub total_cost_nis: String,
    /// 별도 계량되는 대형 설비(웨이브 머신) 전력량 [KW]
    pub machine_energy_kw: String,
    /// 임차인 전용 계량기 전력량 [KW]
    pub tenant_energy_kw: String,
}

/// 숫자로 해석된 네 검침값.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readings {
    pub total_energy_kw: f64,
    pub total_cost_nis: f64,
    pub machine_energy_kw: f64,
    pub tenant_energy_kw: f64,
}

impl BillInputs {
    pub fn new(
        total_energy_kw: impl Into<String>,
        total_cost_nis: impl Into<String>,
        machine_energy_kw: impl Into<String>,
        tenant_energy_kw: impl Into<String>,
    ) -> Self {
        Self {
            total_energy_kw: total_energy_kw.into(),
            total_cost_nis: total_cost_nis.into(),
            machine_energy_kw: machine_energy_kw.into(),
            tenant_energy_kw: tenant_energy_kw.into(),
        }
    }

    /// 네 필드를 모두 숫자로 해석한다. 해석할 수 없는 필드는 0이 된다.
    pub fn parse(&self) -> Readings {
        Readings {
            total_energy_kw: parse_reading(&self.total_energy_kw),
            total_cost_nis: parse_reading(&self.total_cost_nis),
            machine_energy_kw: parse_reading(&self.machine_energy_kw),
            tenant_energy_kw: parse_reading(&self.tenant_energy_kw),
        }
    }
}

/// 입력 문자열 앞부분의 숫자만 읽어 f64로 변환한다.
///
/// 앞쪽 공백은 건너뛰고, `[+-]? (숫자 [. 숫자] | . 숫자) ([eE] [+-]? 숫자)?` 또는
/// `[+-]? Infinity` 형태의 가장 긴 접두부를 취한다. 뒤따르는 문자("12kW"의 "kW")는 무시한다.
/// 접두부가 없거나 결과가 NaN 또는 ±0이면 0.0을 돌려준다.
pub fn parse_reading(raw: &str) -> f64 {
    let value = leading_number(raw).unwrap_or(0.0);
    if value.is_nan() || value == 0.0 {
        0.0
    } else {
        value
    }
}

fn leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
