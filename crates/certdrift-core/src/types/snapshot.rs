//! Raw inventory captured from the enumeration tool.

/// Tool output split into records, in emission order.
///
/// Records keep the tool's exact bytes. sigcheck emits subject names in the
/// console code page, so nothing here assumes UTF-8.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventorySnapshot {
    lines: Vec<Vec<u8>>,
}

impl InventorySnapshot {
    /// Split raw stdout into records.
    ///
    /// Accepts `\r\n`, `\n` and lone `\r` as terminators. A terminator at the
    /// very end does not produce a trailing empty record.
    #[must_use]
    pub fn from_bytes(raw: &[u8]) -> Self {
        let mut lines = Vec::new();
        let mut rest = raw;
        while !rest.is_empty() {
            match rest.iter().position(|&b| b == b'\r' || b == b'\n') {
                Some(idx) => {
                    lines.push(rest[..idx].to_vec());
                    let skip = if rest[idx..].starts_with(b"\r\n") { 2 } else { 1 };
                    rest = &rest[idx + skip..];
                }
                None => {
                    lines.push(rest.to_vec());
                    rest = &[];
                }
            }
        }
        Self { lines }
    }

    /// Raw record bytes, terminators stripped.
    #[must_use]
    pub fn lines(&self) -> &[Vec<u8>] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Normalized artifact content: every record followed by `\n`.
    #[must_use]
    pub fn to_artifact_bytes(&self) -> Vec<u8> {
        let cap = self.lines.iter().map(|l| l.len() + 1).sum();
        let mut out = Vec::with_capacity(cap);
        for line in &self.lines {
            out.extend_from_slice(line);
            out.push(b'\n');
        }
        out
    }
}
