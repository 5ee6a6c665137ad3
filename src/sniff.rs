///what we inferred about a byte payload by staring at its leading bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileKind {
    pub extension: &'static str,
    pub mime_type: &'static str,
}

impl Default for FileKind {
    ///a stream of bytes with no recognisable shape
    fn default() -> Self {
        Self {
            extension: "bin",
            mime_type: "application/octet-stream",
        }
    }
}

const fn kind(extension: &'static str, mime_type: &'static str) -> FileKind {
    FileKind {
        extension,
        mime_type,
    }
}

///infer a file kind from magic numbers alone - filenames are never consulted
pub fn sniff(data: &[u8]) -> FileKind {
    if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        kind("png", "image/png")
    } else if data.starts_with(b"\xff\xd8\xff") {
        kind("jpg", "image/jpeg")
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        kind("gif", "image/gif")
    } else if data.starts_with(b"RIFF") && data.len() >= 12 && &data[8..12] == b"WEBP" {
        kind("webp", "image/webp")
    } else if data.starts_with(b"RIFF") && data.len() >= 12 && &data[8..12] == b"WAVE" {
        kind("wav", "audio/wav")
    } else if data.starts_with(b"%PDF") {
        kind("pdf", "application/pdf")
    } else if data.starts_with(b"PK\x03\x04") {
        kind("zip", "application/zip")
    } else if data.starts_with(b"\x1f\x8b") {
        kind("gz", "application/gzip")
    } else if data.starts_with(b"7z\xbc\xaf\x27\x1c") {
        kind("7z", "application/x-7z-compressed")
    } else if data.starts_with(b"II*\0") || data.starts_with(b"MM\0*") {
        kind("tif", "image/tiff")
    } else if data.starts_with(b"BM") {
        kind("bmp", "image/bmp")
    } else if data.starts_with(b"OggS") {
        kind("ogg", "audio/ogg")
    } else if data.starts_with(b"fLaC") {
        kind("flac", "audio/flac")
    } else if data.starts_with(b"ID3") || data.starts_with(b"\xff\xfb") {
        kind("mp3", "audio/mpeg")
    } else if data.starts_with(b"wOFF") {
        kind("woff", "font/woff")
    } else if data.starts_with(b"wOF2") {
        kind("woff2", "font/woff2")
    } else if data.len() >= 12 && &data[4..8] == b"ftyp" {
        kind("mp4", "video/mp4")
    } else if data.len() >= 262 && &data[257..262] == b"ustar" {
        kind("tar", "application/x-tar")
    } else {
        FileKind::default()
    }
}
