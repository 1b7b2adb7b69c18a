//! Export Downloads
//!
//! Fetches a binary export and hands it to the browser as a file save.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, HtmlAnchorElement, Url};

use super::{js_error, send, ApiError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Excel,
    Pdf,
}

impl ExportFormat {
    fn segment(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "excel",
            ExportFormat::Pdf => "pdf",
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "Excel",
            ExportFormat::Pdf => "PDF",
        }
    }
}

/// `filename=` value of a Content-Disposition header
pub fn filename_from_disposition(header: &str) -> Option<String> {
    header.split(';').find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("filename") {
            return None;
        }
        let name = value.trim().trim_matches('"');
        (!name.is_empty()).then(|| name.to_string())
    })
}

/// Download `/api/{resource}/export/{format}` and save it
pub async fn download(resource: &str, format: ExportFormat) -> Result<(), ApiError> {
    let path = format!("/{}/export/{}", resource, format.segment());
    let response = send("GET", &path, None).await?;

    let filename = response
        .headers()
        .get("content-disposition")
        .ok()
        .flatten()
        .and_then(|h| filename_from_disposition(&h))
        .unwrap_or_else(|| format!("{}_data.{}", resource, format.extension()));

    let promise = response.blob().map_err(js_error)?;
    let blob: Blob = JsFuture::from(promise)
        .await
        .map_err(js_error)?
        .dyn_into()
        .map_err(js_error)?;
    let href = Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ApiError::network("no document"))?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| ApiError::network("anchor element unavailable"))?;
    anchor.set_href(&href);
    anchor.set_download(&filename);
    anchor.click();
    let _ = Url::revoke_object_url(&href);

    web_sys::console::log_1(&format!("[API] saved {}", filename).into());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_disposition() {
        assert_eq!(
            filename_from_disposition("attachment; filename=overhaul_data_20240501.xlsx").as_deref(),
            Some("overhaul_data_20240501.xlsx")
        );
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="a b.pdf""#).as_deref(),
            Some("a b.pdf")
        );
        assert_eq!(filename_from_disposition("inline"), None);
    }
}
