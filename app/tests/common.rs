#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use y_favicon_core::config::{ConfigProvider, Settings, default_settings};

#[derive(Clone)]
pub struct TestProvider {
    base: PathBuf,
}

impl TestProvider {
    pub fn new() -> Self {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let tid = format!("{:?}", std::thread::current().id());
        let dir = std::env::temp_dir().join(format!(
            "y-favicon-tests-{}-{}-{}",
            std::process::id(),
            tid,
            stamp
        ));
        fs::create_dir_all(&dir).unwrap();
        Self { base: dir }
    }
}

impl Default for TestProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigProvider for TestProvider {
    fn base_dir(&self) -> PathBuf {
        self.base.clone()
    }
}

/// Default settings writing under `root/assets/img`, with font candidates
/// that exist but cannot be parsed so the built-in font is always used.
pub fn site_settings(root: &Path) -> Settings {
    fs::create_dir_all(root.join("assets/img")).unwrap();
    let fake = root.join("fake-bold.ttf");
    fs::write(&fake, b"definitely not a font").unwrap();
    let mut s = default_settings().with_output_dir(root);
    s.font_candidates = vec![
        root.join("missing.ttf").to_string_lossy().into_owned(),
        fake.to_string_lossy().into_owned(),
    ];
    s
}

/// Width, height and raw RGB bytes of a PNG file.
pub fn decode_rgb(path: &Path) -> (u32, u32, Vec<u8>) {
    let file = std::io::BufReader::new(fs::File::open(path).unwrap());
    let mut reader = png::Decoder::new(file).read_info().unwrap();
    let (width, height) = (reader.info().width, reader.info().height);
    let mut buf = vec![0; (width * height * 3) as usize];
    let info = reader.next_frame(&mut buf).unwrap();
    assert_eq!(info.color_type, png::ColorType::Rgb);
    assert_eq!(info.bit_depth, png::BitDepth::Eight);
    (width, height, buf)
}

pub fn rgb_at(data: &[u8], width: u32, x: u32, y: u32) -> [u8; 3] {
    let i = ((y * width + x) * 3) as usize;
    [data[i], data[i + 1], data[i + 2]]
}
