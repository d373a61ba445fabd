mod code;
mod qr;
mod render;

pub use code::QRCode;
pub(crate) use qr::QR;
#[cfg(test)]
pub(crate) use qr::Module;

use log::{debug, info};

use crate::common::{
    bitstream::BitStream,
    codec::{encode, encode_with_version},
    ec::{ecc, interleave},
    error::{QRError, QRResult},
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};

/// Fluent configuration for a single symbol. Unset options are resolved during [`QRBuilder::build`].
pub struct QRBuilder<'a> {
    data: &'a [u8],
    version: Option<Version>,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
    masking: bool,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, version: None, ec_level: ECLevel::M, mask: None, masking: true }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn unset_mask(&mut self) -> &mut Self {
        self.mask = None;
        self
    }

    /// Skips masking altogether. The format info still names mask 0 so the symbol stays
    /// parseable, but the data modules are left as placed. Meant for debugging only.
    pub fn disable_masking(&mut self, disable: bool) -> &mut Self {
        self.masking = !disable;
        self
    }

    pub fn metadata(&self) -> String {
        let ver = self.version.map_or("None".to_string(), |v| v.to_string());
        let mask = match (self.masking, self.mask) {
            (false, _) => "Disabled".to_string(),
            (true, Some(m)) => m.to_string(),
            (true, None) => "None".to_string(),
        };
        format!("{{ Version: {ver}, Ec level: {}, Mask: {mask} }}", self.ec_level)
    }
}

#[cfg(test)]
mod qrbuilder_util_tests {
    use super::QRBuilder;
    use crate::common::{
        mask::MaskPattern,
        metadata::{ECLevel, Version},
    };

    #[test]
    fn test_metadata() {
        let data = "Hello, world!".as_bytes();
        let mut qr_builder = QRBuilder::new(data);
        assert_eq!(qr_builder.metadata(), "{ Version: None, Ec level: M, Mask: None }");
        qr_builder.version(Version::Normal(1)).ec_level(ECLevel::L).mask(MaskPattern::from_index(3));
        assert_eq!(qr_builder.metadata(), "{ Version: 1, Ec level: L, Mask: 3 }");
        qr_builder.unset_version().unset_mask();
        assert_eq!(qr_builder.metadata(), "{ Version: None, Ec level: L, Mask: None }");
        qr_builder.disable_masking(true);
        assert_eq!(qr_builder.metadata(), "{ Version: None, Ec level: L, Mask: Disabled }");
    }
}

impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QRCode> {
        debug!("Generating QR {}", self.metadata());
        if self.data.is_empty() {
            return Err(QRError::EmptyData);
        }

        debug!("Encoding data...");
        let (encoded, version, mode) = match self.version {
            Some(v) => {
                let (encoded, mode) = encode_with_version(self.data, v, self.ec_level)?;
                (encoded, v, mode)
            }
            None => {
                debug!("Finding best version...");
                encode(self.data, self.ec_level)?
            }
        };
        debug!("Selected version {version}, mode {mode:?}");

        debug!("Constructing payload with ecc & interleaving...");
        let payload = Self::construct_payload(encoded.data(), version, self.ec_level);

        debug!("Constructing QR...");
        let mut qr = QR::new(version, self.ec_level, mode);

        debug!("Drawing functional patterns...");
        qr.draw_all_function_patterns();

        debug!("Drawing encoding region...");
        qr.draw_encoding_region(&payload);

        let mask = match (self.masking, self.mask) {
            (false, _) => {
                debug!("Masking disabled, recording mask 0 in format info");
                let m = MaskPattern::from_index(0);
                qr.set_mask_info(m);
                m
            }
            (true, Some(m)) => {
                debug!("Applying mask {m}...");
                qr.apply_mask(m);
                m
            }
            (true, None) => {
                debug!("Finding & applying best mask...");
                apply_best_mask(&mut qr)
            }
        };
        debug_assert!(qr.mask() == Some(mask), "Format info doesn't reflect mask {mask}");

        let data_capacity = version.data_codewords(self.ec_level);
        let total_modules = version.width() * version.width();
        let dark_modules = qr.count_dark_modules();

        let code = qr.finalize();
        info!("QR generated: {}", code.metadata());
        info!(
            "Data size: {}, Data capacity: {data_capacity}, Ec codewords: {}, Mask: {mask}",
            self.data.len(),
            version.ec_info(self.ec_level).total_ec_codewords
        );
        info!(
            "Dark cells: {dark_modules}, Light cells: {}, Balance: {}%",
            total_modules - dark_modules,
            dark_modules * 100 / total_modules
        );

        Ok(code)
    }

    /// Splits the padded codewords into blocks, appends their ecc and interleaves both halves.
    fn construct_payload(data: &[u8], version: Version, ec_level: ECLevel) -> BitStream {
        debug_assert!(
            data.len() == version.data_codewords(ec_level),
            "Encoded data doesn't fill the symbol: Data len {}, Data capacity {}",
            data.len(),
            version.data_codewords(ec_level)
        );

        let (data_blocks, ecc_blocks) = ecc(data, version, ec_level);
        let mut payload = BitStream::with_capacity(version.total_codewords() << 3);
        payload.extend(&interleave(&data_blocks));
        payload.extend(&interleave(&ecc_blocks));
        payload
    }
}
