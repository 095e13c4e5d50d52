/// 1つの名前に複数の値を保持できるヘッダーコレクション
///
/// 名前は受信したとおりの大文字小文字で区別する（正規化しない）。
/// 名前は最初に追加された順、同じ名前への値は追加順に保持される。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMultimap {
    entries: Vec<(String, Vec<String>)>,
}

impl HeaderMultimap {
    /// 空のマルチマップを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 値を末尾に追加（既存の値は保持）
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    /// 最初に追加された値を取得
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).first().map(String::as_str)
    }

    /// 名前に対応する全ての値を追加順で取得
    pub fn get_all(&self, name: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// (名前, 値リスト) を名前の追加順で列挙
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// 名前の数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for HeaderMultimap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.add(name, value);
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut headers = HeaderMultimap::new();
        headers.add("X-Multi-Header", "abc");
        headers.add("X-Multi-Header", "def");

        assert_eq!(headers.get_all("X-Multi-Header"), ["abc", "def"]);
        assert_eq!(headers.get("X-Multi-Header"), Some("abc"));
        assert_eq!(headers.len(), 1);
    }

    /// 名前は大文字小文字を区別する
    #[test]
    fn test_names_are_case_sensitive() {
        let mut headers = HeaderMultimap::new();
        headers.add("Content-Type", "text/plain");

        headers.add("content-type", "text/html");

        assert_eq!(headers.get("Content-Type"), Some("text/plain"));
        assert_eq!(headers.get("content-type"), Some("text/html"));
        assert!(headers.get("CONTENT-TYPE").is_none());
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_get_all_missing_name_is_empty() {
        let headers = HeaderMultimap::new();
        assert!(headers.get_all("Missing").is_empty());
        assert!(headers.is_empty());
    }

    #[test]
    fn test_iter_in_first_insertion_order() {
        let headers: HeaderMultimap = [("b", "1"), ("a", "2"), ("b", "3")].into_iter().collect();
        let entries: Vec<(&str, &[String])> = headers.iter().collect();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "b");
        assert_eq!(entries[0].1, ["1", "3"]);
        assert_eq!(entries[1].0, "a");
    }
}
