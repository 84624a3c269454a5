//! Image derivation operation
//!
//! Produces one resized variant per (source image, size spec) pair. Each
//! variant is independent; the source is decoded once per image and the
//! variant is named `<stem>-<name><suffix>.<ext>` under the destination
//! root, mirroring the source's relative directory.

use crate::config::{ImagesSpec, SizeSpec, Width};
use crate::error::{ExecutionError, ExecutionResult};
use crate::ops::fileset;
use crate::runner::{interpolate, interpolate_list, Context};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Run an images step
pub fn run(spec: &ImagesSpec, ctx: &Context) -> ExecutionResult<()> {
    for mapping in &spec.files {
        let base = ctx.working_dir.join(interpolate(&mapping.cwd, &ctx.vars));
        let dest_root = ctx.working_dir.join(interpolate(&mapping.dest, &ctx.vars));
        let patterns = interpolate_list(&mapping.src, &ctx.vars);

        let matched = fileset::expand_patterns(&base, &patterns)?;
        let mut produced = 0usize;

        for file in &matched {
            let source = image::open(&file.path)?;

            for size in &spec.sizes {
                let variant = derive_variant(&source, size)?;
                let out_path = dest_root.join(variant_name(&file.relative, size));

                if let Some(parent) = out_path.parent() {
                    fs::create_dir_all(parent).map_err(|e| ExecutionError::Write {
                        path: parent.to_path_buf(),
                        error: e,
                    })?;
                }

                save_variant(&variant, &out_path, spec.quality)?;
                produced += 1;
            }
        }

        ctx.print_step(
            "images",
            &format!(
                "{} images x {} sizes -> {} variants in {}",
                matched.len(),
                spec.sizes.len(),
                produced,
                dest_root.display()
            ),
        );
    }

    Ok(())
}

/// Resize one source image per a size spec, keeping the aspect ratio
fn derive_variant(source: &DynamicImage, size: &SizeSpec) -> ExecutionResult<DynamicImage> {
    let width = size
        .parsed_width()
        .ok_or_else(|| ExecutionError::InvalidWidth(size.width.clone()))?;

    let target_w = match width {
        Width::Percent(p) => ((source.width() as u64 * p as u64) / 100).max(1) as u32,
        Width::Pixels(n) => n,
    };
    let target_h = ((source.height() as u64 * target_w as u64) / source.width() as u64).max(1) as u32;

    Ok(source.resize_exact(target_w, target_h, FilterType::Lanczos3))
}

/// Variant filename: `<stem>-<name><suffix>.<ext>`, relative directory preserved
fn variant_name(relative: &Path, size: &SizeSpec) -> PathBuf {
    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut name = format!("{}-{}{}", stem, size.name, size.suffix);
    if let Some(ext) = relative.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }

    match relative.parent() {
        Some(parent) if parent != Path::new("") => parent.join(name),
        _ => PathBuf::from(name),
    }
}

/// Write the variant; JPEG honors the configured quality
fn save_variant(variant: &DynamicImage, path: &Path, quality: u8) -> ExecutionResult<()> {
    let is_jpeg = path
        .extension()
        .map(|e| {
            let e = e.to_string_lossy().to_lowercase();
            e == "jpg" || e == "jpeg"
        })
        .unwrap_or(false);

    if is_jpeg {
        let file = File::create(path).map_err(|e| ExecutionError::Write {
            path: path.to_path_buf(),
            error: e,
        })?;
        let mut writer = BufWriter::new(file);
        let mut encoder = JpegEncoder::new_with_quality(&mut writer, quality);
        encoder.encode_image(&variant.to_rgb8())?;
    } else {
        variant.save(path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileMapping;
    use image::{GenericImageView, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn size(width: &str, name: &str, suffix: &str) -> SizeSpec {
        SizeSpec {
            width: width.to_string(),
            name: name.to_string(),
            suffix: suffix.to_string(),
        }
    }

    fn write_png(path: &Path, w: u32, h: u32) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let img = RgbaImage::from_pixel(w, h, Rgba([200, 40, 40, 255]));
        img.save(path).unwrap();
    }

    #[test]
    fn test_variant_name_with_suffix() {
        let name = variant_name(Path::new("photos/pic.jpg"), &size("100%", "large", ".x2"));
        assert_eq!(name, PathBuf::from("photos/pic-large.x2.jpg"));
    }

    #[test]
    fn test_variant_name_without_suffix() {
        let name = variant_name(Path::new("pic.png"), &size("50%", "medium", ""));
        assert_eq!(name, PathBuf::from("pic-medium.png"));
    }

    #[test]
    fn test_one_variant_per_size_spec() {
        let temp = TempDir::new().unwrap();
        write_png(&temp.path().join("src/images/hero.png"), 40, 20);

        let ctx = Context::new().with_working_dir(temp.path().to_path_buf());
        let spec = ImagesSpec {
            files: vec![FileMapping {
                cwd: "src/images".to_string(),
                src: vec!["**/*.png".to_string()],
                dest: "app/images".to_string(),
            }],
            sizes: vec![
                size("100%", "large", ".x2"),
                size("50%", "large", ""),
                size("10", "small", ""),
            ],
            quality: 75,
        };

        run(&spec, &ctx).unwrap();

        let out = temp.path().join("app/images");
        assert!(out.join("hero-large.x2.png").exists());
        assert!(out.join("hero-large.png").exists());
        assert!(out.join("hero-small.png").exists());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 3);
    }

    #[test]
    fn test_proportional_and_fixed_widths() {
        let temp = TempDir::new().unwrap();
        write_png(&temp.path().join("imgs/banner.png"), 40, 20);

        let ctx = Context::new().with_working_dir(temp.path().to_path_buf());
        let spec = ImagesSpec {
            files: vec![FileMapping {
                cwd: "imgs".to_string(),
                src: vec!["*.png".to_string()],
                dest: "out".to_string(),
            }],
            sizes: vec![size("50%", "half", ""), size("10", "tiny", "")],
            quality: 75,
        };

        run(&spec, &ctx).unwrap();

        let half = image::open(temp.path().join("out/banner-half.png")).unwrap();
        assert_eq!(half.dimensions(), (20, 10));

        let tiny = image::open(temp.path().join("out/banner-tiny.png")).unwrap();
        assert_eq!(tiny.dimensions(), (10, 5));
    }

    #[test]
    fn test_relative_directories_are_mirrored() {
        let temp = TempDir::new().unwrap();
        write_png(&temp.path().join("src/gallery/summer/beach.png"), 8, 8);

        let ctx = Context::new().with_working_dir(temp.path().to_path_buf());
        let spec = ImagesSpec {
            files: vec![FileMapping {
                cwd: "src".to_string(),
                src: vec!["**/*.png".to_string()],
                dest: "app".to_string(),
            }],
            sizes: vec![size("100%", "large", "")],
            quality: 75,
        };

        run(&spec, &ctx).unwrap();
        assert!(temp.path().join("app/gallery/summer/beach-large.png").exists());
    }

    #[test]
    fn test_unreadable_image_fails_step() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("imgs")).unwrap();
        fs::write(temp.path().join("imgs/broken.png"), b"not an image").unwrap();

        let ctx = Context::new().with_working_dir(temp.path().to_path_buf());
        let spec = ImagesSpec {
            files: vec![FileMapping {
                cwd: "imgs".to_string(),
                src: vec!["*.png".to_string()],
                dest: "out".to_string(),
            }],
            sizes: vec![size("50%", "half", "")],
            quality: 75,
        };

        let result = run(&spec, &ctx);
        assert!(matches!(result, Err(ExecutionError::Image(_))));
    }
}
