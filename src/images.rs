use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use anyhow::{Context, Result, anyhow};
use image::ImageFormat;

use crate::http_client::http_client;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageFetch {
    Loaded {
        width: u32,
        height: u32,
        format: Option<ImageFormat>,
    },
    Placeholder {
        reason: String,
    },
}

impl ImageFetch {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageFetch::Placeholder { .. })
    }

    pub fn describe(&self) -> String {
        match self {
            ImageFetch::Loaded {
                width,
                height,
                format,
            } => match format {
                Some(fmt) => format!("{width}x{height} {fmt:?}"),
                None => format!("{width}x{height}"),
            },
            ImageFetch::Placeholder { .. } => "no image".to_string(),
        }
    }
}

/// Best-effort download and decode of a logo or photo. Any failure (bad URL,
/// timeout, non-2xx status, undecodable body) becomes a placeholder.
pub fn fetch_image(url: &str, timeout_secs: u64) -> ImageFetch {
    let url = url.trim();
    if !url.starts_with("http") {
        return ImageFetch::Placeholder {
            reason: "no image url".to_string(),
        };
    }
    match try_fetch(url, timeout_secs) {
        Ok(fetch) => fetch,
        Err(err) => ImageFetch::Placeholder {
            reason: format!("{err:#}"),
        },
    }
}

fn try_fetch(url: &str, timeout_secs: u64) -> Result<ImageFetch> {
    let client = http_client(timeout_secs)?;
    let resp = client.get(url).send().context("request failed")?;
    let status = resp.status();
    if !status.is_success() {
        return Err(anyhow!("http {status}"));
    }
    let body = resp.bytes().context("failed reading body")?;
    decode_image(&body)
}

pub fn decode_image(bytes: &[u8]) -> Result<ImageFetch> {
    let format = image::guess_format(bytes).ok();
    let img = image::load_from_memory(bytes).context("decode image")?;
    Ok(ImageFetch::Loaded {
        width: img.width(),
        height: img.height(),
        format,
    })
}

/// A fetched image, tagged with the URL it was requested for.
pub type ImageDelta = (String, ImageFetch);

/// Background fetcher: URLs go in on the returned sender, results come back
/// on the receiver in request order. The thread exits once the sender is
/// dropped.
pub fn spawn_image_worker(timeout_secs: u64) -> (Sender<String>, Receiver<ImageDelta>) {
    let (req_tx, req_rx) = mpsc::channel::<String>();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for url in req_rx {
            let fetched = fetch_image(&url, timeout_secs);
            if tx.send((url, fetched)).is_err() {
                break;
            }
        }
    });
    (req_tx, rx)
}
