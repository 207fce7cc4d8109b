use std::ffi::OsStr;
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use log::info;

use crate::error::{Error, Result};

/// 렌더러가 픽셀 하나를 다 계산할 때마다 불리는 출력 대상
pub trait PixelSink {
    fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]);
}

pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.image.get_pixel(x, y).0
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    // 확장자로 포맷을 고름. png, jpg, jpeg 말고는 거절
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let format = match path.extension().and_then(OsStr::to_str) {
            Some(extension) if extension.eq_ignore_ascii_case("png") => ImageFormat::Png,
            Some(extension)
                if extension.eq_ignore_ascii_case("jpg") || extension.eq_ignore_ascii_case("jpeg") =>
            {
                ImageFormat::Jpeg
            }
            _ => return Err(Error::UnsupportedFormat(path.to_path_buf())),
        };

        self.image.save_with_format(path, format)?;
        info!(
            "wrote {}x{} image to {}",
            self.width(),
            self.height(),
            path.display()
        );
        Ok(())
    }
}

impl PixelSink for Canvas {
    fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        self.image.put_pixel(x, y, Rgb(rgb));
    }
}
