use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use tincture::{extract, extract_with_rng, CancelToken, Error, KMeans, Palette, PixelBuffer};

fn is_upper_hex(hex: &str) -> bool {
    hex.len() == 7
        && hex.starts_with('#')
        && hex[1..].chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
}

fn gradient_buffer() -> PixelBuffer {
    let mut rgba = Vec::with_capacity(64 * 64 * 4);
    for y in 0..64u32 {
        for x in 0..64u32 {
            rgba.extend_from_slice(&[(x * 4) as u8, (y * 4) as u8, ((x + y) * 2) as u8, 255]);
        }
    }

    PixelBuffer::from_rgba(64, 64, &rgba).unwrap()
}

#[test]
fn returns_exactly_k_well_formed_colors() {
    let buffer = gradient_buffer();

    for k in 1..=10 {
        let colors = extract(&buffer, k).unwrap();
        assert_eq!(colors.len(), k);

        for color in colors {
            assert!(is_upper_hex(&color.hex()), "{}", color.hex());
        }
    }
}

#[test]
fn single_color_image_collapses_every_centroid() {
    let buffer = PixelBuffer::from_pixels(std::iter::repeat((12, 200, 99)).take(50));

    for k in [1, 2, 5, 9] {
        for _ in 0..2 {
            let colors = extract(&buffer, k).unwrap();
            assert!(colors.iter().all(|color| color.rgb() == (12, 200, 99)));
        }
    }
}

#[test]
fn all_near_black_is_invalid_input() {
    let rgba = [0, 0, 0, 255, 10, 10, 10, 255, 30, 0, 0, 255, 0, 0, 0, 0];
    let buffer = PixelBuffer::from_rgba(2, 2, &rgba).unwrap();

    assert!(buffer.is_empty());
    assert!(matches!(extract(&buffer, 3), Err(Error::InvalidInput(_))));
}

#[test]
fn zero_colors_is_invalid_input() {
    assert!(matches!(extract(&gradient_buffer(), 0), Err(Error::InvalidInput(_))));
}

#[test]
fn one_color_is_the_mean() {
    let buffer = gradient_buffer();
    let mean = buffer.mean().unwrap();

    let colors = extract(&buffer, 1).unwrap();
    let (r, g, b) = colors[0].rgb();

    assert!((r as i16 - mean.0 as i16).abs() <= 1);
    assert!((g as i16 - mean.1 as i16).abs() <= 1);
    assert!((b as i16 - mean.2 as i16).abs() <= 1);
    assert_eq!(colors[0].population() as usize, buffer.len());
}

#[test]
fn red_and_blue_separate() {
    let buffer = PixelBuffer::from_pixels(
        std::iter::repeat((255, 0, 0))
            .take(100)
            .chain(std::iter::repeat((0, 0, 255)).take(100)),
    );

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
    for _ in 0..32 {
        let mut colors = extract_with_rng(&buffer, 2, &mut rng)
            .unwrap()
            .into_iter()
            .map(|color| color.rgb())
            .collect::<Vec<_>>();
        colors.sort();

        assert_eq!(colors, [(0, 0, 255), (255, 0, 0)]);
    }
}

#[test]
fn seeded_builder_is_reproducible() {
    let image = tincture::image::RgbImage::from_fn(32, 32, |x, y| tincture::image::Rgb([x as u8 * 8, y as u8 * 8, 128]));

    let a = Palette::from_image(image.clone()).color_count(6).seed(3).generate().unwrap();
    let b = Palette::from_image(image).color_count(6).seed(3).generate().unwrap();

    assert_eq!(a, b);
}

#[test]
fn cancellation_from_another_thread() {
    let token = CancelToken::new();
    let buffer = gradient_buffer();
    let kmeans = KMeans::new(4).iterations(usize::MAX).cancel_token(token.clone());

    let handle = std::thread::spawn(move || kmeans.run(&buffer, &mut rand::thread_rng()));
    token.cancel();

    assert_eq!(handle.join().unwrap(), Err(Error::Cancelled));
}
