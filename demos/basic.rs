use tincture::image::io::Reader as ImageReader;

fn main() {
    let reader = ImageReader::open("photo.jpg").unwrap();
    let img = reader.decode().unwrap();
    let buf = img.to_rgb8();

    let palette = tincture::Palette::from_image(buf)
        .color_count(6)
        .seed(42)
        .generate()
        .unwrap();

    println!("{:#?}", palette);
}
