//! 字符串编码转换
//!
//! G-key SDK 传入的按键标签是 UTF-16 宽字符串，日志使用 UTF-8

use thiserror::Error;

/// 编码转换错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodingError {
    /// 含有不成对的代理项
    #[error("Invalid UTF-16 sequence")]
    InvalidUtf16,
}

/// 将 UTF-16 宽字符串转换为 UTF-8
///
/// 在第一个 NUL 处截断
pub fn wide_to_utf8(wide: &[u16]) -> Result<String, EncodingError> {
    let end = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    String::from_utf16(&wide[..end]).map_err(|_| EncodingError::InvalidUtf16)
}

/// 转换以 NUL 结尾的宽字符串指针，空指针视为空字符串
///
/// # Safety
///
/// `ptr` 为空，或指向以 NUL 结尾且在调用期间有效的 UTF-16 数组
pub unsafe fn wide_ptr_to_utf8(ptr: *const u16) -> Result<String, EncodingError> {
    if ptr.is_null() {
        return Ok(String::new());
    }
    let mut len = 0;
    // SAFETY: 调用方保证数组以 NUL 结尾
    while unsafe { *ptr.add(len) } != 0 {
        len += 1;
    }
    // SAFETY: [ptr, ptr + len) 均已读过
    wide_to_utf8(unsafe { std::slice::from_raw_parts(ptr, len) })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_ascii() {
        assert_eq!(wide_to_utf8(&wide("G1")).unwrap(), "G1");
    }

    #[test]
    fn test_non_ascii() {
        assert_eq!(wide_to_utf8(&wide("Tastatur Ü 键")).unwrap(), "Tastatur Ü 键");
    }

    #[test]
    fn test_stops_at_nul() {
        let mut input = wide("G5");
        input.push(0);
        input.extend(wide("garbage"));
        assert_eq!(wide_to_utf8(&input).unwrap(), "G5");
    }

    #[test]
    fn test_unpaired_surrogate() {
        assert_eq!(
            wide_to_utf8(&[0x0047, 0xD800, 0x0031]),
            Err(EncodingError::InvalidUtf16)
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(wide_to_utf8(&[]).unwrap(), "");
    }

    #[test]
    fn test_pointer() {
        let mut label = wide("G12/M2");
        label.push(0);
        assert_eq!(unsafe { wide_ptr_to_utf8(label.as_ptr()) }.unwrap(), "G12/M2");
        assert_eq!(unsafe { wide_ptr_to_utf8(std::ptr::null()) }.unwrap(), "");
    }
}
