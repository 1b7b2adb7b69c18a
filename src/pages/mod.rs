//! Pages
//!
//! One page per route. Resource pages share the `Collection` state.

mod collection;
mod dashboard;
mod inventory;
mod kalibrasi;
mod login;
mod not_found;
mod overhaul;
mod personalia;
mod produksi;
mod profile;
mod qc;
mod rekayasa;
mod stock;

pub use dashboard::DashboardPage;
pub use inventory::InventoryPage;
pub use kalibrasi::KalibrasiPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use overhaul::OverhaulPage;
pub use personalia::PersonaliaPage;
pub use produksi::ProduksiPage;
pub use profile::ProfilePage;
pub use qc::QcPage;
pub use rekayasa::RekayasaPage;
pub use stock::StockPage;

// ========================
// Display helpers
// ========================

/// `2024-05-01T08:30:00Z` → `2024-05-01 08:30`; `-` when absent
pub(crate) fn format_timestamp(value: Option<&str>) -> String {
    match value {
        Some(ts) if ts.len() >= 16 && ts.is_char_boundary(16) => ts[..16].replacen('T', " ", 1),
        Some(ts) if !ts.is_empty() => ts.to_string(),
        _ => "-".to_string(),
    }
}

/// Name of the option with `id`, `-` when unset or unknown
pub(crate) fn lookup_name(options: &[(u32, String)], id: Option<u32>) -> String {
    id.and_then(|id| options.iter().find(|(o, _)| *o == id))
        .map(|(_, name)| name.clone())
        .unwrap_or_else(|| "-".to_string())
}

/// `Rp 1.250.000` style amount, rounded to whole rupiah
pub(crate) fn format_rupiah(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let sign = if rounded < 0 { "-" } else { "" };
    format!("Rp {}{}", sign, grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(Some("2024-05-01T08:30:12.5Z")), "2024-05-01 08:30");
        assert_eq!(format_timestamp(Some("2024-05-01")), "2024-05-01");
        assert_eq!(format_timestamp(None), "-");
    }

    #[test]
    fn test_lookup_name() {
        let options = vec![(1, "Relay".to_string()), (2, "Kabel".to_string())];
        assert_eq!(lookup_name(&options, Some(2)), "Kabel");
        assert_eq!(lookup_name(&options, Some(9)), "-");
        assert_eq!(lookup_name(&options, None), "-");
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(1_250_000.0), "Rp 1.250.000");
        assert_eq!(format_rupiah(999.6), "Rp 1.000");
        assert_eq!(format_rupiah(0.0), "Rp 0");
        assert_eq!(format_rupiah(-1500.0), "Rp -1.500");
    }
}
