use tincture::image::io::Reader as ImageReader;

const WHITE_MIN_SUM: u16 = 3 * 240;

fn main() {
    let reader = ImageReader::open("photo.jpg").unwrap();
    let img = reader.decode().unwrap();
    let buf = img.to_rgb8();

    // near-black pixels are already dropped by the default filter; also drop near-white paper
    let palette = tincture::Palette::from_image(buf)
        .add_filter(|(r, g, b): (u8, u8, u8)| (r as u16 + g as u16 + b as u16) < WHITE_MIN_SUM)
        .color_count(4)
        .generate()
        .unwrap();

    for color in palette.sorted_by_population() {
        println!("{color} {}", color.population());
    }
}
