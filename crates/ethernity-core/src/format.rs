/*!
 * Ethernity Format
 *
 * Conversão de valores inteiros on-chain (wei/gwei) para decimais legíveis
 * e cálculo de tempo relativo
 */

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use num_bigint::BigUint;

/// Texto exibido quando um valor não pode ser formatado
pub const PLACEHOLDER: &str = "-";

/// Acima deste número de dígitos o valor é tratado como wei
pub const SHORT_INTEGER_DIGITS: usize = 10;

/// Casas decimais de 1 ETH em wei
pub const ETH_DECIMALS: u32 = 18;

/// Casas decimais exibidas para valores em ETH
pub const DISPLAY_DECIMALS: usize = 6;

const GWEI_DIVISOR: f64 = 1_000_000_000.0;

/// Verifica se o texto é um inteiro base 10 não negativo
pub fn is_decimal_integer(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn require_integer(value: &str) -> Result<&str> {
    let trimmed = value.trim();
    if is_decimal_integer(trimmed) {
        Ok(trimmed)
    } else {
        Err(Error::InvalidNumericLiteral(value.to_string()))
    }
}

/// Converte um valor em wei para ETH sem perda de precisão.
///
/// Valores com até [`SHORT_INTEGER_DIGITS`] dígitos são devolvidos sem
/// conversão: o serviço de dados entrega literais curtos já na unidade final.
/// Acima disso a divisão por 10^18 é feita com inteiros de precisão
/// arbitrária e a parte fracionária é truncada em 6 casas.
pub fn wei_to_eth(value: &str) -> Result<String> {
    let digits = require_integer(value)?;
    if digits.len() <= SHORT_INTEGER_DIGITS {
        return Ok(digits.to_string());
    }

    let wei = BigUint::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| Error::InvalidNumericLiteral(value.to_string()))?;
    let divisor = BigUint::from(10u32).pow(ETH_DECIMALS);
    let whole = &wei / &divisor;
    let remainder = &wei % &divisor;

    let fraction = format!("{:0>width$}", remainder.to_string(), width = ETH_DECIMALS as usize);
    Ok(format!("{}.{}", whole, &fraction[..DISPLAY_DECIMALS]))
}

/// Converte wei para Gwei com duas casas decimais.
///
/// Usa divisão em ponto flutuante; a perda de precisão é aceitável nessa escala.
pub fn wei_to_gwei(value: &str) -> Result<String> {
    let digits = require_integer(value)?;
    let wei = digits
        .parse::<f64>()
        .ok()
        .filter(|wei| wei.is_finite())
        .ok_or_else(|| Error::InvalidNumericLiteral(value.to_string()))?;
    Ok(format!("{:.2} Gwei", wei / GWEI_DIVISOR))
}

/// Interpreta um instante em RFC 3339, `YYYY-MM-DD HH:MM:SS` (UTC) ou epoch.
///
/// Epochs com 13 dígitos ou mais são tratados como milissegundos.
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();
    let invalid = || Error::InvalidTimestamp(value.to_string());

    if is_decimal_integer(trimmed) {
        let epoch: i64 = trimmed.parse().map_err(|_| invalid())?;
        let parsed = if trimmed.len() >= 13 {
            Utc.timestamp_millis_opt(epoch).single()
        } else {
            Utc.timestamp_opt(epoch, 0).single()
        };
        return parsed.ok_or_else(invalid);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(invalid)
}

/// Tempo decorrido até `now`, agrupado em segundos, minutos, horas ou dias
pub fn relative_time_from(value: &str, now: DateTime<Utc>) -> Result<String> {
    let then = parse_instant(value)?;
    let elapsed = (now - then).num_seconds().max(0);

    let text = match elapsed {
        s if s < 60 => format!("{} seconds ago", s),
        s if s < 3_600 => format!("{} minutes ago", s / 60),
        s if s < 86_400 => format!("{} hours ago", s / 3_600),
        s => format!("{} days ago", s / 86_400),
    };
    Ok(text)
}

/// Tempo relativo calculado a partir do relógio atual, sem cache
pub fn relative_time(value: &str) -> Result<String> {
    relative_time_from(value, Utc::now())
}

/// ETH formatado ou [`PLACEHOLDER`]
pub fn display_eth(value: &str) -> String {
    wei_to_eth(value).unwrap_or_else(|_| PLACEHOLDER.to_string())
}

/// Gwei formatado ou [`PLACEHOLDER`]
pub fn display_gwei(value: &str) -> String {
    wei_to_gwei(value).unwrap_or_else(|_| PLACEHOLDER.to_string())
}

/// Tempo relativo ou [`PLACEHOLDER`]
pub fn display_relative_time(value: &str) -> String {
    relative_time(value).unwrap_or_else(|_| PLACEHOLDER.to_string())
}
