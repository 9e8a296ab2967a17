/// 转义 LIKE 模式中的通配符
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like_pattern;

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(escape_like_pattern("CSC_3%"), "CSC\\_3\\%");
        assert_eq!(escape_like_pattern("plain"), "plain");
    }
}
