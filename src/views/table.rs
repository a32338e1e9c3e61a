use std::fmt;

/// Listing rendered as aligned text columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub caption: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(caption: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            caption: caption.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Two-column label/value table, used for dashboard counters.
    pub fn key_values(caption: impl Into<String>, pairs: &[(&str, String)]) -> Self {
        let mut table = Self::new(caption, &["Metric", "Value"]);
        for (k, v) in pairs {
            table.push(vec![k.to_string(), v.clone()]);
        }
        table
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of the column with the given header.
    pub fn column(&self, header: &str) -> Vec<&str> {
        match self.headers.iter().position(|h| h == header) {
            Some(idx) => self
                .rows
                .iter()
                .filter_map(|r| r.get(idx).map(String::as_str))
                .collect(),
            None => Vec::new(),
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.caption.is_empty() {
            writeln!(f, "{}", self.caption)?;
        }

        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }

        let line = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!("{:<width$}", c, width = *w))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        writeln!(f, "{}", line(&self.headers))?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", rule.join("  "))?;

        if self.rows.is_empty() {
            writeln!(f, "(no records)")?;
        }
        for row in &self.rows {
            writeln!(f, "{}", line(row))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_aligned_columns() {
        let mut t = Table::new("Holidays", &["ID", "Name"]);
        t.push(vec!["1".into(), "Winter break".into()]);
        t.push(vec!["12".into(), "Spring".into()]);
        let out = t.to_string();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Holidays");
        assert_eq!(lines[1], "ID  Name");
        assert_eq!(lines[3], "1   Winter break");
        assert_eq!(t.column("Name"), vec!["Winter break", "Spring"]);
    }

    #[test]
    fn empty_table_says_so() {
        let t = Table::new("", &["ID"]);
        assert!(t.to_string().contains("(no records)"));
    }
}
