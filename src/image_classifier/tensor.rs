use image::{imageops, DynamicImage};
use tract_onnx::prelude::*;

/// Fit the image into `width` x `height` without distortion: scale to
/// the bounding box, then pad to the exact size with black borders.
pub fn fit_image(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    if image.width() == image.height() && width == height {
        return image.resize_exact(width, height, imageops::FilterType::Triangle);
    }

    let (w, h) = (image.width() as f32, image.height() as f32);
    let scale = (width as f32 / w).min(height as f32 / h);
    let new_w = ((w * scale) as u32).max(1);
    let new_h = ((h * scale) as u32).max(1);

    let scaled = image
        .resize(new_w, new_h, imageops::FilterType::Triangle)
        .to_rgb8();

    let mut padded = DynamicImage::new_rgb8(width, height).to_rgb8();
    let x_offset = (width - scaled.width()) / 2;
    let y_offset = (height - scaled.height()) / 2;
    imageops::overlay(&mut padded, &scaled, x_offset as i64, y_offset as i64);

    DynamicImage::from(padded)
}

/// Lay the image out as a `[1, 3, height, width]` tensor of `f32`
/// channel values normalized to `[0, 1]`.
pub fn image_to_tensor(
    image: &DynamicImage,
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    let rgb = image.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    let mut tensor = Tensor::zero::<f32>(&[1, 3, height, width])?;

    let values = tensor.as_slice_mut::<f32>()?;
    for (x, y, pixel) in rgb.enumerate_pixels() {
        for channel in 0..3 {
            let index = channel * height * width + y as usize * width + x as usize;
            values[index] = pixel[channel] as f32 / 255.0;
        }
    }

    Ok(tensor)
}

pub fn fit_image_to_tensor(
    image: &DynamicImage,
    width: u32,
    height: u32,
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    image_to_tensor(&fit_image(image, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, Rgb};

    #[test]
    fn test_square_image_fills_the_tensor() {
        let image = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(100, 100, Rgb([255, 0, 0])));

        let tensor = fit_image_to_tensor(&image, 224, 224).unwrap();
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);

        let values = tensor.as_slice::<f32>().unwrap();
        // Red everywhere, green and blue empty.
        assert_eq!(values[0], 1.0);
        assert_eq!(values[224 * 224], 0.0);
        assert_eq!(values[2 * 224 * 224], 0.0);
    }

    #[test]
    fn test_wide_image_is_centered() {
        let image = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(200, 100, Rgb([255, 0, 0])));

        let tensor = fit_image_to_tensor(&image, 224, 224).unwrap();
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);

        let values = tensor.as_slice::<f32>().unwrap();
        let center = 112 * 224 + 112;
        let top_edge = 2 * 224 + 112;
        assert_eq!(values[center], 1.0);
        assert_eq!(values[top_edge], 0.0);
    }

    #[test]
    fn test_values_are_normalized() {
        let image = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(50, 50, Rgb([128, 128, 128])));

        let tensor = fit_image_to_tensor(&image, 224, 224).unwrap();
        let values = tensor.as_slice::<f32>().unwrap();

        let expected = 128.0 / 255.0;
        let center = 112 * 224 + 112;
        assert!((values[center] - expected).abs() < 0.01);
    }
}
