//! In-memory catalog clients for store tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use image::{ImageFormat, RgbaImage};
use pokedex::api::{display_name, CatalogClient, CatalogError};
use pokedex::state::{PokemonDetail, PokemonSummary};
use tokio::sync::Notify;

pub fn entry(id: u32, name: &str) -> PokemonSummary {
    PokemonSummary {
        id,
        name: name.to_string(),
        image_url: name.to_lowercase(),
    }
}

pub fn detail(id: u32, name: &str) -> PokemonDetail {
    PokemonDetail {
        id,
        name: name.to_string(),
        height: 7,
        weight: 69,
        types: vec!["grass".into(), "poison".into()],
        sprite_url: "sprite".into(),
    }
}

/// A blank PNG of the given size
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    RgbaImage::new(width, height)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

pub fn names(entries: &[PokemonSummary]) -> Vec<String> {
    entries.iter().map(|entry| entry.name.clone()).collect()
}

/// Catalog that serves a fixed page, with scripted failures and call tracking.
///
/// Details are synthesized from the requested key unless a failure is queued.
/// Sprite downloads fail until [`FakeCatalog::serve_sprite`] provides bytes.
#[derive(Default)]
pub struct FakeCatalog {
    page: Vec<PokemonSummary>,
    page_failures: Mutex<VecDeque<String>>,
    detail_failures: Mutex<VecDeque<String>>,
    page_calls: AtomicUsize,
    detail_keys: Mutex<Vec<String>>,
    page_gate: Option<Notify>,
    sprite: Mutex<Option<Vec<u8>>>,
    sprite_urls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn with_page(page: Vec<PokemonSummary>) -> Arc<Self> {
        Arc::new(Self {
            page,
            ..Default::default()
        })
    }

    /// Page fetches wait for [`FakeCatalog::release_page`] before answering
    pub fn gated(page: Vec<PokemonSummary>) -> Arc<Self> {
        Arc::new(Self {
            page,
            page_gate: Some(Notify::new()),
            ..Default::default()
        })
    }

    pub fn release_page(&self) {
        if let Some(gate) = &self.page_gate {
            gate.notify_one();
        }
    }

    pub fn fail_next_page(&self, message: &str) {
        self.page_failures
            .lock()
            .unwrap()
            .push_back(message.to_string());
    }

    pub fn fail_next_detail(&self, message: &str) {
        self.detail_failures
            .lock()
            .unwrap()
            .push_back(message.to_string());
    }

    pub fn serve_sprite(&self, bytes: Vec<u8>) {
        *self.sprite.lock().unwrap() = Some(bytes);
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    pub fn detail_keys(&self) -> Vec<String> {
        self.detail_keys.lock().unwrap().clone()
    }

    pub fn sprite_urls(&self) -> Vec<String> {
        self.sprite_urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    async fn fetch_page(
        &self,
        _limit: u32,
        _offset: u32,
    ) -> Result<Vec<PokemonSummary>, CatalogError> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.page_gate {
            gate.notified().await;
        }
        let failure = self.page_failures.lock().unwrap().pop_front();
        match failure {
            Some(message) => Err(CatalogError::Request(message)),
            None => Ok(self.page.clone()),
        }
    }

    async fn fetch_detail(&self, key: &str) -> Result<PokemonDetail, CatalogError> {
        self.detail_keys.lock().unwrap().push(key.to_string());
        let failure = self.detail_failures.lock().unwrap().pop_front();
        match failure {
            Some(message) => Err(CatalogError::Request(message)),
            None => Ok(detail(1, &display_name(key))),
        }
    }

    async fn fetch_sprite(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        self.sprite_urls.lock().unwrap().push(url.to_string());
        self.sprite
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| CatalogError::Request("no sprite".into()))
    }
}
