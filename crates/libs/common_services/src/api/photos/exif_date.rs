use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::io::Cursor;

/// Extracts the capture time from a photo's EXIF data, if present.
/// Prefers `DateTimeOriginal` and falls back to `DateTime`.
#[must_use]
pub fn acquisition_date_from_exif(bytes: &[u8]) -> Option<DateTime<Utc>> {
    let mut cursor = Cursor::new(bytes);
    let exif = exif::Reader::new().read_from_container(&mut cursor).ok()?;
    let field = exif
        .get_field(exif::Tag::DateTimeOriginal, exif::In::PRIMARY)
        .or_else(|| exif.get_field(exif::Tag::DateTime, exif::In::PRIMARY))?;

    match field.value {
        exif::Value::Ascii(ref values) if !values.is_empty() => {
            let parsed = exif::DateTime::from_ascii(&values[0]).ok()?;
            exif_datetime_to_utc(&parsed)
        }
        _ => None,
    }
}

/// EXIF timestamps carry no timezone; they are interpreted as UTC.
fn exif_datetime_to_utc(dt: &exif::DateTime) -> Option<DateTime<Utc>> {
    let naive = NaiveDate::from_ymd_opt(i32::from(dt.year), u32::from(dt.month), u32::from(dt.day))?
        .and_hms_opt(
            u32::from(dt.hour),
            u32::from(dt.minute),
            u32::from(dt.second),
        )?;
    Some(Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    /// Builds a JPEG consisting of a single APP1 segment whose little-endian
    /// TIFF body carries one `DateTimeOriginal` tag.
    fn minimal_exif_jpeg(datetime: &str) -> Vec<u8> {
        assert_eq!(datetime.len(), 19);

        let mut tiff = Vec::new();
        tiff.extend_from_slice(b"II\x2a\x00");
        tiff.extend_from_slice(&8u32.to_le_bytes());
        // IFD0: one entry pointing at the Exif sub-IFD at offset 26.
        tiff.extend_from_slice(&1u16.to_le_bytes());
        tiff.extend_from_slice(&0x8769u16.to_le_bytes());
        tiff.extend_from_slice(&4u16.to_le_bytes());
        tiff.extend_from_slice(&1u32.to_le_bytes());
        tiff.extend_from_slice(&26u32.to_le_bytes());
        tiff.extend_from_slice(&0u32.to_le_bytes());
        // Exif IFD: DateTimeOriginal as a 20-byte ASCII value at offset 44.
        tiff.extend_from_slice(&1u16.to_le_bytes());
        tiff.extend_from_slice(&0x9003u16.to_le_bytes());
        tiff.extend_from_slice(&2u16.to_le_bytes());
        tiff.extend_from_slice(&20u32.to_le_bytes());
        tiff.extend_from_slice(&44u32.to_le_bytes());
        tiff.extend_from_slice(&0u32.to_le_bytes());
        tiff.extend_from_slice(datetime.as_bytes());
        tiff.push(0);

        let mut app1 = b"Exif\x00\x00".to_vec();
        app1.extend_from_slice(&tiff);

        let mut jpeg = b"\xff\xd8\xff\xe1".to_vec();
        jpeg.extend_from_slice(&u16::try_from(app1.len() + 2).expect("fits").to_be_bytes());
        jpeg.extend_from_slice(&app1);
        jpeg.extend_from_slice(b"\xff\xd9");
        jpeg
    }

    #[test]
    fn date_time_original_is_extracted_from_jpeg_bytes() {
        let bytes = minimal_exif_jpeg("2015:03:14 09:26:53");
        let utc = acquisition_date_from_exif(&bytes).expect("exif date");
        assert_eq!((utc.year(), utc.month(), utc.day()), (2015, 3, 14));
        assert_eq!((utc.hour(), utc.minute(), utc.second()), (9, 26, 53));
    }

    #[test]
    fn exif_ascii_datetime_parses_to_utc() {
        let parsed = exif::DateTime::from_ascii(b"2023:04:01 12:30:05").expect("valid ascii");
        let utc = exif_datetime_to_utc(&parsed).expect("in range");
        assert_eq!(
            (utc.year(), utc.month(), utc.day()),
            (2023, 4, 1)
        );
        assert_eq!((utc.hour(), utc.minute(), utc.second()), (12, 30, 5));
    }

    #[test]
    fn out_of_range_datetime_is_rejected() {
        let mut parsed = exif::DateTime::from_ascii(b"2023:04:01 12:30:05").expect("valid ascii");
        parsed.month = 13;
        assert!(exif_datetime_to_utc(&parsed).is_none());
    }

    #[test]
    fn bytes_without_exif_yield_none() {
        assert!(acquisition_date_from_exif(b"definitely not an image").is_none());
    }
}
