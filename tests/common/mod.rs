//! Shared helpers for integration tests.
//!
//! Provides [`FakeHttp`], an in-memory [`HttpGet`] that serves canned bodies
//! and records every request, plus small image fixture builders.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

use posterforge::config::Config;
use posterforge::error::HttpError;
use posterforge::http::HttpGet;
use posterforge::images::encode_jpeg;

#[derive(Default)]
pub struct FakeHttp {
    routes: Mutex<HashMap<String, Result<Vec<u8>, u16>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.routes
            .lock()
            .unwrap()
            .insert(url.into(), Ok(body.into()));
    }

    pub fn fail(&self, url: impl Into<String>, status: u16) {
        self.routes.lock().unwrap().insert(url.into(), Err(status));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl HttpGet for FakeHttp {
    fn get(&self, url: &str, _timeout: Duration) -> Result<Vec<u8>, HttpError> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.routes.lock().unwrap().get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(HttpError::Status(*status)),
            None => Err(HttpError::Status(404)),
        }
    }
}

pub const API_KEY: &str = "test-key";

/// A config over `root` with no delay and every feature disabled.
pub fn test_config(root: &Path) -> Config {
    let mut config = Config::new(API_KEY, root);
    config.request_delay = Duration::ZERO;
    config
}

pub fn details_url(id: u64) -> String {
    format!(
        "https://api.themoviedb.org/3/movie/{id}?api_key={API_KEY}&append_to_response=external_ids"
    )
}

pub fn details_json(id: u64, poster_path: &str, vote_average: f64, vote_count: u64) -> String {
    format!(
        r#"{{"id":{id},"poster_path":"{poster_path}","vote_average":{vote_average},"vote_count":{vote_count}}}"#
    )
}

/// A solid-color JPEG, as TMDB would serve it.
pub fn solid_jpeg(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    encode_jpeg(&RgbImage::from_pixel(width, height, Rgb(color)), 95).unwrap()
}

/// Write a solid-color RGBA PNG to `path`.
pub fn write_png(path: &Path, width: u32, height: u32, color: [u8; 4]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    RgbaImage::from_pixel(width, height, Rgba(color))
        .save_with_format(path, ImageFormat::Png)
        .unwrap();
}

pub fn movie_dir(root: &Path, name: &str) -> PathBuf {
    let dir = root.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Center pixel of a decoded image, as RGB.
pub fn center_pixel(path: &Path) -> [u8; 3] {
    let img = image::open(path).unwrap().to_rgb8();
    img.get_pixel(img.width() / 2, img.height() / 2).0
}

pub fn close_to(actual: [u8; 3], expected: [u8; 3]) -> bool {
    actual
        .iter()
        .zip(expected.iter())
        .all(|(a, e)| (*a as i16 - *e as i16).abs() <= 12)
}
