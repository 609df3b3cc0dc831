//! Implementation of the `pt export` command.
//!
//! Writes every customer, in store order, to a CSV file.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use pt_core::{Customer, customers_to_csv};

/// Writes the customer CSV to `path` and reports the count.
pub fn run<W: Write>(writer: &mut W, customers: &[Customer], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    fs::write(path, customers_to_csv(customers))
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), count = customers.len(), "exported customers");

    writeln!(
        writer,
        "Exported {} customers to {}",
        customers.len(),
        path.display()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pt_core::seed;
    use tempfile::TempDir;

    #[test]
    fn test_export_writes_csv() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out/customers.csv");
        let mut output = Vec::new();

        run(&mut output, &seed::customers(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, customers_to_csv(&seed::customers()));
        assert_eq!(content.lines().count(), 6);
        assert!(content.starts_with("First Name,Last Name,Email,Phone,Address,City\n"));
        assert_eq!(
            String::from_utf8(output).unwrap(),
            format!("Exported 5 customers to {}\n", path.display())
        );
    }

    #[test]
    fn test_export_empty_store_writes_header_only() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("customers.csv");

        run(&mut Vec::new(), &[], &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
