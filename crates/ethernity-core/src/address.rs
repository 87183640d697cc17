/*!
 * Ethernity Address
 *
 * Representação curta de endereços e hashes e cor determinística de identicon
 */

use crate::error::{Error, Result};
use ethereum_types::Address;
use std::str::FromStr;

/// Endereço nulo de 20 bytes
pub const NULL_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Caracteres mantidos no início da forma curta
pub const DEFAULT_HEAD_LEN: usize = 6;

/// Caracteres mantidos no final da forma curta
pub const DEFAULT_TAIL_LEN: usize = 4;

/// Abrevia `value` como `"{início}...{fim}"`
pub fn shorten(value: &str, head_len: usize, tail_len: usize) -> Result<String> {
    let chars: Vec<char> = value.chars().collect();
    let window = head_len + tail_len;
    if chars.len() <= window {
        return Err(Error::TooShort { len: chars.len(), window });
    }

    let head: String = chars[..head_len].iter().collect();
    let tail: String = chars[chars.len() - tail_len..].iter().collect();
    Ok(format!("{}...{}", head, tail))
}

/// Abrevia com a janela padrão 6/4
pub fn shorten_default(value: &str) -> Result<String> {
    shorten(value, DEFAULT_HEAD_LEN, DEFAULT_TAIL_LEN)
}

/// Forma curta, ou o valor completo quando ele não cabe na janela
pub fn display_short(value: &str, head_len: usize, tail_len: usize) -> String {
    shorten(value, head_len, tail_len).unwrap_or_else(|_| value.to_string())
}

/// Comparação exata com o endereço nulo
pub fn is_null_address(value: &str) -> bool {
    value == NULL_ADDRESS
}

/// Converte uma string hexadecimal com prefixo `0x` para Address
pub fn parse_address(value: &str) -> Option<Address> {
    let hex = value.strip_prefix("0x")?;
    if hex.len() != 40 {
        return None;
    }
    Address::from_str(hex).ok()
}

/// Cor RGB determinística derivada do endereço.
///
/// Hash rolante `hash * 31 + código` sobre as unidades UTF-16 com overflow
/// de 32 bits; os multiplicadores 1, 7 e 13 são fixos para manter as
/// mesmas cores das instalações existentes.
pub fn identicon_color(address: &str) -> (u8, u8, u8) {
    let hash = address
        .encode_utf16()
        .fold(0i32, |acc, code| acc.wrapping_mul(31).wrapping_add(i32::from(code)));
    magnitude_to_rgb(i64::from(hash).unsigned_abs())
}

fn magnitude_to_rgb(h: u64) -> (u8, u8, u8) {
    (
        (h % 255) as u8,
        ((h * 7) % 255) as u8,
        ((h * 13) % 255) as u8,
    )
}
