//! Image lookup across the folders the pages may be served from.
//!
//! Each image is tried folder by folder; the first one that decodes wins.

use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

pub const CANDIDATE_FOLDERS: &[&str] = &[
    "./src/images/",
    "./images/",
    "../src/images/",
    "../images/",
    "../../src/images/",
    "./assets/images/",
];

pub const CROWN_FILE: &str = "CrownNoBackground.png";

pub fn candidate_urls(file: &str) -> Vec<String> {
    CANDIDATE_FOLDERS.iter().map(|folder| format!("{}{}", folder, file)).collect()
}

/// Try `urls` in order; None if every one fails to decode.
pub async fn load_from(urls: &[String]) -> Option<(HtmlImageElement, String)> {
    for url in urls {
        let img = match HtmlImageElement::new() {
            Ok(img) => img,
            Err(_) => return None,
        };
        img.set_src(url);
        match JsFuture::from(img.decode()).await {
            Ok(_) => return Some((img, url.clone())),
            Err(_) => log::debug!("image miss: {}", url),
        }
    }
    None
}

/// Load `file` from the first candidate folder that has it. Failures are logged, not returned.
pub async fn load_first(file: &str) -> Option<HtmlImageElement> {
    match load_from(&candidate_urls(file)).await {
        Some((img, url)) => {
            log::info!("loaded image {}", url);
            Some(img)
        }
        None => {
            log::warn!("image {} not found in any asset folder", file);
            None
        }
    }
}
