use anyhow::Result;
use std::path::{Path, PathBuf};

/// First candidate that exists on disk and that `load` accepts.
///
/// Missing paths and load failures are logged and skipped; `None` means the
/// caller should use the built-in font. Nothing is cached between calls.
pub fn probe_candidates<T, L>(candidates: &[String], size: u32, mut load: L) -> Option<(PathBuf, T)>
where
    L: FnMut(&Path, u32) -> Result<T>,
{
    for candidate in candidates {
        let path = Path::new(candidate);
        if !path.exists() {
            tracing::debug!(target = "font", path = %candidate, "candidate_missing");
            continue;
        }
        match load(path, size) {
            Ok(font) => {
                tracing::debug!(target = "font", path = %candidate, size, "candidate_loaded");
                return Some((path.to_path_buf(), font));
            }
            Err(e) => {
                tracing::debug!(target = "font", path = %candidate, error = %format!("{e:#}"), "candidate_load_failed");
            }
        }
    }
    None
}

#[cfg(feature = "imaging")]
pub use truetype::{LoadedFont, load_truetype, resolve_font};

#[cfg(feature = "imaging")]
mod truetype {
    use ab_glyph::{Font, FontVec, PxScale};
    use anyhow::{Context, Result, ensure};
    use std::{
        fs,
        path::{Path, PathBuf},
    };

    use super::probe_candidates;
    use crate::{backend::FontSource, builtin_font};

    pub enum LoadedFont {
        TrueType {
            path: PathBuf,
            font: FontVec,
            scale: PxScale,
        },
        BuiltIn {
            scale: u32,
        },
    }

    impl LoadedFont {
        pub fn source(&self) -> FontSource {
            match self {
                LoadedFont::TrueType { path, .. } => FontSource::TrueType(path.clone()),
                LoadedFont::BuiltIn { .. } => FontSource::BuiltIn,
            }
        }
    }

    /// Load the first face of a TrueType/OpenType file (collections included)
    /// and work out the pixel scale for an em of `size` pixels.
    pub fn load_truetype(path: &Path, size: u32) -> Result<(FontVec, PxScale)> {
        ensure!(size > 0, "font size must be positive");
        let data = fs::read(path).with_context(|| format!("read {}", path.display()))?;
        let font = FontVec::try_from_vec_and_index(data, 0)
            .with_context(|| format!("parse {}", path.display()))?;
        let units_per_em = font
            .units_per_em()
            .with_context(|| format!("{} has no units-per-em", path.display()))?;
        // PxScale is ascent-to-descent height, the requested size is the em.
        let height = size as f32 * font.height_unscaled() / units_per_em;
        ensure!(
            height.is_finite() && height > 0.0,
            "{} has degenerate vertical metrics",
            path.display()
        );
        Ok((font, PxScale::from(height)))
    }

    pub fn resolve_font(candidates: &[String], size: u32) -> LoadedFont {
        match probe_candidates(candidates, size, load_truetype) {
            Some((path, (font, scale))) => LoadedFont::TrueType { path, font, scale },
            None => {
                tracing::debug!(target = "font", size, "using_builtin_font");
                LoadedFont::BuiltIn {
                    scale: builtin_font::scale_for(size),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::{fs, time::{SystemTime, UNIX_EPOCH}};

    fn temp_dir(tag: &str) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let tid = format!("{:?}", std::thread::current().id());
        let dir = std::env::temp_dir().join(format!(
            "y-favicon-font-{tag}-{}-{}-{}",
            std::process::id(),
            tid,
            stamp
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn touch(dir: &Path, name: &str) -> String {
        let p = dir.join(name);
        fs::write(&p, b"not a font").unwrap();
        p.to_string_lossy().into_owned()
    }

    #[test]
    fn first_existing_and_loadable_candidate_wins() {
        let dir = temp_dir("order");
        let missing = dir.join("missing.ttf").to_string_lossy().into_owned();
        let broken = touch(&dir, "broken.ttf");
        let good = touch(&dir, "good.ttf");
        let later = touch(&dir, "later.ttf");
        let candidates = vec![missing, broken.clone(), good.clone(), later];

        let mut attempts = Vec::new();
        let chosen = probe_candidates(&candidates, 24, |path, size| {
            attempts.push(path.to_string_lossy().into_owned());
            if path.ends_with("broken.ttf") {
                bail!("corrupt");
            }
            Ok(size)
        });

        let (path, loaded_size) = chosen.unwrap();
        assert_eq!(path, PathBuf::from(&good));
        assert_eq!(loaded_size, 24);
        // missing path is never handed to the loader, later ones are not tried
        assert_eq!(attempts, vec![broken, good]);
    }

    #[test]
    fn exhausting_candidates_yields_none() {
        let dir = temp_dir("none");
        let candidates = vec![touch(&dir, "a.ttf"), touch(&dir, "b.ttf")];
        let mut calls = 0;
        let chosen: Option<(PathBuf, ())> = probe_candidates(&candidates, 140, |_, _| {
            calls += 1;
            bail!("unreadable")
        });
        assert!(chosen.is_none());
        assert_eq!(calls, 2);
        assert!(probe_candidates(&[], 24, |_, s| Ok(s)).is_none());
    }

    #[cfg(feature = "imaging")]
    const FIXTURE_FONT: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/DejaVuSans-Bold.ttf"
    );

    #[cfg(feature = "imaging")]
    #[test]
    fn broken_candidate_is_skipped_for_next_loadable_font() {
        let dir = temp_dir("truetype");
        let broken = touch(&dir, "broken-bold.ttf");
        let candidates = vec![
            dir.join("missing.ttf").to_string_lossy().into_owned(),
            broken,
            FIXTURE_FONT.to_string(),
            touch(&dir, "never-tried.ttf"),
        ];
        match resolve_font(&candidates, 24) {
            LoadedFont::TrueType { path, scale, .. } => {
                assert_eq!(path, PathBuf::from(FIXTURE_FONT));
                // em of 24px maps to a taller ascent-to-descent scale
                assert!(scale.y > 24.0 && scale.y < 36.0, "{scale:?}");
                assert_eq!(scale.x, scale.y);
            }
            LoadedFont::BuiltIn { .. } => panic!("fixture font was not loaded"),
        }
    }

    #[cfg(feature = "imaging")]
    #[test]
    fn em_scale_grows_with_requested_size() {
        let (_, small) = load_truetype(Path::new(FIXTURE_FONT), 24).unwrap();
        let (_, large) = load_truetype(Path::new(FIXTURE_FONT), 140).unwrap();
        let ratio = large.y / small.y;
        assert!((ratio - 140.0 / 24.0).abs() < 1e-3, "{ratio}");
        assert!(load_truetype(Path::new(FIXTURE_FONT), 0).is_err());
    }

    #[cfg(feature = "imaging")]
    #[test]
    fn unparseable_font_files_fall_back_to_builtin() {
        let dir = temp_dir("builtin");
        let candidates = vec![touch(&dir, "fake.ttf"), touch(&dir, "fake.ttc")];
        assert!(load_truetype(Path::new(&candidates[0]), 24).is_err());
        match resolve_font(&candidates, 24) {
            LoadedFont::BuiltIn { scale } => assert_eq!(scale, 3),
            LoadedFont::TrueType { path, .. } => panic!("unexpected font {}", path.display()),
        }
    }
}
