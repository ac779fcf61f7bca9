//! 朗读文本提取
//!
//! 将章节的富文本（HTML）正文转换为适合语音合成的纯文本：
//! 去除所有标签、解码 HTML 实体、压缩空白

use thiserror::Error;

/// HTML 渲染宽度
/// 取足够大的值避免 html2text 对长句换行
const RENDER_WIDTH: usize = 10_000;

/// 朗读文本提取错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NarrationError {
    /// 去除标签和空白后没有剩余文本
    #[error("Content is empty after markup removal")]
    Empty,

    #[error("Failed to parse content markup: {0}")]
    Malformed(String),
}

/// 从章节 HTML 正文提取朗读纯文本
///
/// 处理步骤：
/// 1. 去除标签、解码实体（html2text）
/// 2. 压缩连续空白为单个空格
/// 3. 去除首尾空白
///
/// 结果为空是一个独立的、可上报的失败，不是成功的空串
pub fn extract_narration(html: &str) -> Result<String, NarrationError> {
    let rendered = html2text::from_read(html.as_bytes(), RENDER_WIDTH)
        .map_err(|e| NarrationError::Malformed(e.to_string()))?;

    let text = normalize_whitespace(&rendered);

    if text.is_empty() {
        return Err(NarrationError::Empty);
    }

    Ok(text)
}

/// 压缩连续空白（含换行）为单个空格，并去除首尾空白
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags() {
        let html = "<h3>Chapter One</h3><p>It was a dark and stormy night.</p>";
        let text = extract_narration(html).unwrap();
        assert!(text.contains("Chapter One"));
        assert!(text.contains("It was a dark and stormy night."));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_decodes_entities() {
        let html = "<p>Tom &amp; Jerry &mdash; &quot;friends&quot;</p>";
        let text = extract_narration(html).unwrap();
        assert!(text.contains("Tom & Jerry"));
        assert!(text.contains('"'));
        assert!(!text.contains("&amp;"));
    }

    #[test]
    fn test_collapses_whitespace() {
        let html = "<p>first</p>\n\n\n<p>second   third</p>";
        let text = extract_narration(html).unwrap();
        assert_eq!(text, "first second third");
    }

    #[test]
    fn test_markup_only_is_empty() {
        let html = "<div><br/><img src=\"cover.png\"/></div>   \n  ";
        assert_eq!(extract_narration(html), Err(NarrationError::Empty));
    }

    #[test]
    fn test_empty_input_is_empty() {
        assert_eq!(extract_narration(""), Err(NarrationError::Empty));
        assert_eq!(extract_narration("   \n\t "), Err(NarrationError::Empty));
    }

    #[test]
    fn test_plain_text_passes_through() {
        let text = extract_narration("Just plain text.").unwrap();
        assert_eq!(text, "Just plain text.");
    }
}
