//! Image signature sniffing.
//!
//! The picker only accepts `image/*` files. The MIME type is decided from the
//! leading bytes, never from the file extension.

/// Number of header bytes needed to recognize every supported format.
pub const HEADER_LEN: usize = 12;

/// Return the MIME type for a recognized image header, or `None`.
pub fn sniff_mime(header: &[u8]) -> Option<&'static str> {
    if header.len() < 4 {
        return None;
    }

    // JPEG: FF D8 FF
    if header.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }

    // PNG: 89 50 4E 47
    if header.starts_with(&[0x89, b'P', b'N', b'G']) {
        return Some("image/png");
    }

    // GIF: GIF8
    if header.starts_with(b"GIF8") {
        return Some("image/gif");
    }

    // WebP: RIFF....WEBP
    if header.starts_with(b"RIFF") {
        if header.len() >= 12 && &header[8..12] == b"WEBP" {
            return Some("image/webp");
        }
        // RIFF without the WEBP tag is audio/video
        return None;
    }

    // BMP: BM, file size, then four reserved zero bytes
    if header.starts_with(b"BM") {
        if header.len() >= 10 && header[6..10] == [0, 0, 0, 0] {
            return Some("image/bmp");
        }
        return None;
    }

    // TIFF: II (little-endian) or MM (big-endian) followed by version 42
    if header.starts_with(&[b'I', b'I', 0x2A, 0x00]) || header.starts_with(&[b'M', b'M', 0x00, 0x2A])
    {
        return Some("image/tiff");
    }

    // ISO-BMFF: ftyp box at offset 4, brand decides HEIC vs AVIF
    if header.len() >= 12 && &header[4..8] == b"ftyp" {
        return match &header[8..12] {
            b"avif" | b"avis" => Some("image/avif"),
            b"heic" | b"heix" | b"hevc" | b"hevx" | b"mif1" | b"msf1" => Some("image/heic"),
            _ => None,
        };
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_jpeg() {
        let header = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(sniff_mime(&header), Some("image/jpeg"));
    }

    #[test]
    fn test_sniff_png() {
        let header = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        assert_eq!(sniff_mime(&header), Some("image/png"));
    }

    #[test]
    fn test_sniff_webp() {
        let header = [b'R', b'I', b'F', b'F', 0, 0, 0, 0, b'W', b'E', b'B', b'P'];
        assert_eq!(sniff_mime(&header), Some("image/webp"));
    }

    #[test]
    fn test_sniff_riff_wave_rejected() {
        let header = [b'R', b'I', b'F', b'F', 0, 0, 0, 0, b'W', b'A', b'V', b'E'];
        assert_eq!(sniff_mime(&header), None);
    }

    #[test]
    fn test_sniff_bmp() {
        // 0x46 bytes long, reserved fields zero, pixel data at 0x36
        let header = [b'B', b'M', 0x46, 0, 0, 0, 0, 0, 0, 0, 0x36, 0];
        assert_eq!(sniff_mime(&header), Some("image/bmp"));
    }

    #[test]
    fn test_sniff_text_starting_with_bm_rejected() {
        assert_eq!(sniff_mime(b"BMW service "), None);
        assert_eq!(sniff_mime(b"BM\0\0"), None);
    }

    #[test]
    fn test_sniff_tiff_both_endians() {
        let le = [b'I', b'I', 0x2A, 0x00, 0, 0, 0, 0];
        let be = [b'M', b'M', 0x00, 0x2A, 0, 0, 0, 0];
        assert_eq!(sniff_mime(&le), Some("image/tiff"));
        assert_eq!(sniff_mime(&be), Some("image/tiff"));
    }

    #[test]
    fn test_sniff_bare_ii_rejected() {
        let header = [b'I', b'I', 0x00, 0x00, 0, 0, 0, 0];
        assert_eq!(sniff_mime(&header), None);
    }

    #[test]
    fn test_sniff_heic_and_avif() {
        let heic = [0, 0, 0, 0x18, b'f', b't', b'y', b'p', b'h', b'e', b'i', b'c'];
        let avif = [0, 0, 0, 0x1C, b'f', b't', b'y', b'p', b'a', b'v', b'i', b'f'];
        assert_eq!(sniff_mime(&heic), Some("image/heic"));
        assert_eq!(sniff_mime(&avif), Some("image/avif"));
    }

    #[test]
    fn test_sniff_mp4_rejected() {
        let mp4 = [0, 0, 0, 0x18, b'f', b't', b'y', b'p', b'i', b's', b'o', b'm'];
        assert_eq!(sniff_mime(&mp4), None);
    }

    #[test]
    fn test_sniff_text_and_short_input_rejected() {
        assert_eq!(sniff_mime(b"hello world!"), None);
        assert_eq!(sniff_mime(&[0xFF, 0xD8]), None);
    }
}
