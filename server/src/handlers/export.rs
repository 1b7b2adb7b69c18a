//! Spreadsheet and PDF Exports
//!
//! Each exportable resource is first flattened into a [`Table`], which is
//! then rendered either as an `.xlsx` workbook or as an A4 landscape PDF.

use std::collections::HashMap;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use chrono::{Local, NaiveDate};
use printpdf::{BuiltinFont, Mm, PdfDocument, PdfLayerReference};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::domain::{
    Calibration, DomainError, DomainResult, InventoryItem, Overhaul, Personnel, ProductionRun,
    Profile, CALIBRATION_STEPS,
};
use crate::repository::{
    CalibrationRepository, InventoryRepository, OverhaulRepository, PersonnelRepository,
    ProductionRepository, ProfileRepository, Repository,
};
use crate::AppState;
use super::error::ApiError;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const PDF_MIME: &str = "application/pdf";

// ========================
// Table model
// ========================

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    fn date(value: Option<NaiveDate>) -> Self {
        Cell::Text(value.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default())
    }

    fn display(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) if n.fract() == 0.0 => format!("{}", *n as i64),
            Cell::Number(n) => format!("{:.2}", n),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    pub title: String,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

/// Resources offering exports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Inventory,
    Overhaul,
    Personalia,
    Kalibrasi,
    Produksi,
}

impl ExportKind {
    /// File name stem, e.g. `overhaul_data`
    fn file_stem(&self) -> &'static str {
        match self {
            ExportKind::Inventory => "inventory_data",
            ExportKind::Overhaul => "overhaul_data",
            ExportKind::Personalia => "personalia_data",
            ExportKind::Kalibrasi => "kalibrasi_data",
            ExportKind::Produksi => "produksi_data",
        }
    }

    async fn load(self, state: &AppState) -> DomainResult<Table> {
        match self {
            ExportKind::Inventory => {
                let items = state.repo::<InventoryRepository>().list().await?;
                Ok(inventory_table(&items))
            }
            ExportKind::Overhaul => {
                let overhauls = state.repo::<OverhaulRepository>().list().await?;
                let people = state.repo::<PersonnelRepository>().list().await?;
                let items = state.repo::<InventoryRepository>().list().await?;
                Ok(overhaul_table(&overhauls, &people, &items))
            }
            ExportKind::Personalia => {
                let people = state.repo::<PersonnelRepository>().list().await?;
                let profiles = state.repo::<ProfileRepository>().list().await?;
                Ok(personnel_table(&people, &profiles))
            }
            ExportKind::Kalibrasi => {
                let tools = state.repo::<CalibrationRepository>().list().await?;
                Ok(calibration_table(&tools))
            }
            ExportKind::Produksi => {
                let runs = state.repo::<ProductionRepository>().list().await?;
                Ok(production_table(&runs))
            }
        }
    }
}

// ========================
// Flattening
// ========================

pub fn inventory_table(items: &[InventoryItem]) -> Table {
    Table {
        title: "Data Inventaris".to_string(),
        headers: vec!["ID", "Kode Barang", "Nama", "Jumlah", "Lokasi", "Status"],
        rows: items
            .iter()
            .map(|i| {
                vec![
                    Cell::Number(i.id as f64),
                    Cell::text(&i.item_code),
                    Cell::text(&i.name),
                    Cell::Number(i.quantity as f64),
                    Cell::text(&i.location),
                    Cell::text(&i.status),
                ]
            })
            .collect(),
    }
}

pub fn overhaul_table(
    overhauls: &[Overhaul],
    people: &[Personnel],
    items: &[InventoryItem],
) -> Table {
    let nip_by_id: HashMap<u32, &str> = people.iter().map(|p| (p.id, p.nip.as_str())).collect();
    let item_by_id: HashMap<u32, &str> = items.iter().map(|i| (i.id, i.name.as_str())).collect();
    let lookup = |map: &HashMap<u32, &str>, id: Option<u32>| {
        id.and_then(|id| map.get(&id).copied()).unwrap_or("-").to_string()
    };

    Table {
        title: "Data Overhaul".to_string(),
        headers: vec![
            "ID",
            "Nama",
            "Lokasi",
            "Status",
            "Estimasi",
            "Progress",
            "NIP Personalia",
            "Nama Inventaris",
        ],
        rows: overhauls
            .iter()
            .map(|o| {
                vec![
                    Cell::Number(o.id as f64),
                    Cell::text(&o.name),
                    Cell::text(&o.location),
                    Cell::text(&o.status),
                    Cell::date(o.estimate),
                    Cell::text(format!("{}%", o.progress)),
                    Cell::Text(lookup(&nip_by_id, o.personalia_id)),
                    Cell::Text(lookup(&item_by_id, o.inventory_id)),
                ]
            })
            .collect(),
    }
}

pub fn personnel_table(people: &[Personnel], profiles: &[Profile]) -> Table {
    let profile_by_id: HashMap<u32, &Profile> = profiles.iter().map(|p| (p.id, p)).collect();

    Table {
        title: "Data Personalia".to_string(),
        headers: vec![
            "ID",
            "NIP",
            "Jabatan",
            "Divisi",
            "Status",
            "Tanggal Bergabung",
            "No. Telepon",
            "No. Darurat",
            "Email Profil",
            "Alamat Profil",
        ],
        rows: people
            .iter()
            .map(|p| {
                let profile = p.profile_id.and_then(|id| profile_by_id.get(&id));
                vec![
                    Cell::Number(p.id as f64),
                    Cell::text(&p.nip),
                    Cell::text(&p.jabatan),
                    Cell::text(&p.divisi),
                    Cell::text(&p.status),
                    Cell::date(p.join_date),
                    Cell::text(&p.phone_number),
                    Cell::text(&p.urgent_number),
                    Cell::Text(profile.map(|pr| pr.email.clone()).unwrap_or_else(|| "-".into())),
                    Cell::Text(profile.map(|pr| pr.address.clone()).unwrap_or_else(|| "-".into())),
                ]
            })
            .collect(),
    }
}

pub fn calibration_table(tools: &[Calibration]) -> Table {
    Table {
        title: "Data Kalibrasi".to_string(),
        headers: vec!["ID", "Nama Alat", "Status", "Progress", "Jatuh Tempo", "Update Terakhir"],
        rows: tools
            .iter()
            .map(|c| {
                vec![
                    Cell::Number(c.id as f64),
                    Cell::text(&c.name),
                    Cell::text(&c.status),
                    Cell::text(format!("{}/{}", c.progress, CALIBRATION_STEPS)),
                    Cell::date(c.due_date),
                    Cell::Text(
                        c.last_update
                            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                            .unwrap_or_default(),
                    ),
                ]
            })
            .collect(),
    }
}

pub fn production_table(runs: &[ProductionRun]) -> Table {
    Table {
        title: "Data Produksi".to_string(),
        headers: vec![
            "ID",
            "Nama",
            "Target",
            "Selesai",
            "Status",
            "Mulai",
            "Berakhir",
            "Progress",
            "Biaya Material",
        ],
        rows: runs
            .iter()
            .map(|r| {
                vec![
                    Cell::Number(r.id as f64),
                    Cell::text(&r.name),
                    Cell::Number(r.target as f64),
                    Cell::Number(r.completed as f64),
                    Cell::text(&r.status),
                    Cell::date(r.start_date),
                    Cell::date(r.end_date),
                    Cell::text(format!("{}%", r.progress_percentage())),
                    Cell::Number(r.material_cost()),
                ]
            })
            .collect(),
    }
}

// ========================
// Rendering
// ========================

/// Render a table as an `.xlsx` workbook
pub fn to_xlsx(table: &Table) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Data")?;

    for (col, header) in table.headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }
    for (r, row) in table.rows.iter().enumerate() {
        let r = r as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(s) => sheet.write_string(r, col as u16, s)?,
                Cell::Number(n) => sheet.write_number(r, col as u16, *n)?,
            };
        }
    }
    sheet.autofit();

    workbook.save_to_buffer()
}

const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const MARGIN: f32 = 12.0;
const ROW_HEIGHT: f32 = 6.0;
const TITLE_SIZE: f32 = 16.0;
const HEADER_SIZE: f32 = 9.0;
const BODY_SIZE: f32 = 8.0;

/// Cut text so it fits a column of `width_mm` at the body font size
fn fit(text: &str, width_mm: f32) -> String {
    // Helvetica averages roughly half an em per glyph
    let max_chars = (width_mm / (BODY_SIZE * 0.5 * 0.3528)).max(1.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('~');
    cut
}

/// Render a table as an A4 landscape PDF, paginating as rows run out
pub fn to_pdf(table: &Table) -> Result<Vec<u8>, printpdf::Error> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(&table.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let columns = table.headers.len().max(1);
    let col_width = (PAGE_WIDTH - 2.0 * MARGIN) / columns as f32;
    let x_of = |col: usize| Mm(MARGIN + col as f32 * col_width);

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    layer.use_text(&table.title, TITLE_SIZE, Mm(MARGIN), Mm(PAGE_HEIGHT - MARGIN), &bold);
    let generated = format!("Dicetak {}", Local::now().format("%Y-%m-%d %H:%M"));
    layer.use_text(generated, BODY_SIZE, Mm(MARGIN), Mm(PAGE_HEIGHT - MARGIN - 6.0), &regular);

    let mut y = PAGE_HEIGHT - MARGIN - 16.0;
    let draw_header = |layer: &PdfLayerReference, y: f32| {
        for (col, header) in table.headers.iter().enumerate() {
            layer.use_text(fit(header, col_width), HEADER_SIZE, x_of(col), Mm(y), &bold);
        }
    };
    draw_header(&layer, y);
    y -= ROW_HEIGHT;

    for row in &table.rows {
        if y < MARGIN {
            let (page, page_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            layer = doc.get_page(page).get_layer(page_layer);
            y = PAGE_HEIGHT - MARGIN;
            draw_header(&layer, y);
            y -= ROW_HEIGHT;
        }
        for (col, cell) in row.iter().enumerate() {
            layer.use_text(fit(&cell.display(), col_width), BODY_SIZE, x_of(col), Mm(y), &regular);
        }
        y -= ROW_HEIGHT;
    }

    doc.save_to_bytes()
}

// ========================
// Routes
// ========================

#[derive(Debug, Clone, Copy)]
enum ExportFormat {
    Excel,
    Pdf,
}

async fn export(state: AppState, kind: ExportKind, format: ExportFormat) -> Result<Response, ApiError> {
    let table = kind.load(&state).await?;
    let stamp = Local::now().format("%Y%m%d").to_string();
    let (bytes, mime, ext) = match format {
        ExportFormat::Excel => (
            to_xlsx(&table).map_err(|e| DomainError::Internal(format!("xlsx export failed: {}", e)))?,
            XLSX_MIME,
            "xlsx",
        ),
        ExportFormat::Pdf => (
            to_pdf(&table).map_err(|e| DomainError::Internal(format!("pdf export failed: {}", e)))?,
            PDF_MIME,
            "pdf",
        ),
    };
    tracing::info!("exported {} rows as {}", table.rows.len(), ext);

    let disposition = format!("attachment; filename={}_{}.{}", kind.file_stem(), stamp, ext);
    Ok((
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// `GET /export/excel` and `GET /export/pdf` for one resource
pub fn routes(kind: ExportKind) -> Router<AppState> {
    Router::new()
        .route(
            "/export/excel",
            get(move |State(state): State<AppState>| export(state, kind, ExportFormat::Excel)),
        )
        .route(
            "/export/pdf",
            get(move |State(state): State<AppState>| export(state, kind, ExportFormat::Pdf)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_people() -> (Vec<Personnel>, Vec<Profile>) {
        let people = vec![
            Personnel {
                id: 1,
                nip: "1987".into(),
                profile_id: Some(5),
                ..Default::default()
            },
            Personnel {
                id: 2,
                nip: "1990".into(),
                ..Default::default()
            },
        ];
        let profiles = vec![Profile {
            id: 5,
            email: "andi@example.com".into(),
            address: "Bandung".into(),
            ..Default::default()
        }];
        (people, profiles)
    }

    #[test]
    fn test_personnel_table_resolves_profiles() {
        let (people, profiles) = sample_people();
        let table = personnel_table(&people, &profiles);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][8], Cell::text("andi@example.com"));
        assert_eq!(table.rows[1][8], Cell::text("-"));
        assert!(table.rows.iter().all(|r| r.len() == table.headers.len()));
    }

    #[test]
    fn test_overhaul_table_resolves_references() {
        let overhauls = vec![Overhaul {
            id: 3,
            name: "Gearbox".into(),
            personalia_id: Some(1),
            inventory_id: Some(9),
            progress: 40,
            ..Default::default()
        }];
        let (people, _) = sample_people();
        let table = overhaul_table(&overhauls, &people, &[]);
        assert_eq!(table.rows[0][5], Cell::text("40%"));
        assert_eq!(table.rows[0][6], Cell::text("1987"));
        assert_eq!(table.rows[0][7], Cell::text("-"));
    }

    #[test]
    fn test_xlsx_is_a_zip_container() {
        let items = vec![InventoryItem::new("Relay", 4, "Gudang", "Tersedia", "INV-1")];
        let bytes = to_xlsx(&inventory_table(&items)).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_pdf_paginates_long_tables() {
        let items: Vec<InventoryItem> = (0..80)
            .map(|i| InventoryItem::new(&format!("Item {}", i), i, "Gudang", "Tersedia", "INV"))
            .collect();
        let bytes = to_pdf(&inventory_table(&items)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_fit_truncates_long_text() {
        assert_eq!(fit("short", 40.0), "short");
        let long = "x".repeat(200);
        let cut = fit(&long, 20.0);
        assert!(cut.ends_with('~'));
        assert!(cut.len() < long.len());
    }

    #[test]
    fn test_number_display() {
        assert_eq!(Cell::Number(12.0).display(), "12");
        assert_eq!(Cell::Number(2.5).display(), "2.50");
    }
}
