use std::error::Error;

use qrgen::{ECLevel, MaskPattern, QRBuilder, Version};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let data = "This example shows all available configuration options for QR code generation.";

    let qr = QRBuilder::new(data.as_bytes())
        .version(Version::Normal(8))  // QR version (size) - if not provided, finds smallest version to fit data
        .ec_level(ECLevel::H)         // Error correction level - if not provided, defaults to ECLevel::M
        .mask(MaskPattern::new(2)?)   // Mask pattern - if not provided, finds best mask based on penalty score
        .build()?;

    // Convert to image and save
    let img = qr.to_image(6); // 6x scale factor for larger output
    img.save("configured_qr.png")?;
    std::fs::write("configured_qr.svg", qr.to_svg(6))?;

    println!("Configured QR code saved to: configured_qr.png, configured_qr.svg");
    println!("QR metadata: {}", qr.metadata());
    println!("{}", qr.to_str(1));

    Ok(())
}
