//! Tag definition table
//!
//! Static schema for the EXIF tags this crate knows how to build: the IFD
//! groups each id may appear in, the data types it accepts and its component
//! count. Tags missing from the table can still be decoded and re-encoded;
//! they just cannot be produced through
//! [`TagStore::build`](crate::core::store::TagStore::build).

use crate::core::tag::IfdGroup;
use crate::types::value::DataType;

/// Well-known tag ids
pub mod tag {
    // TIFF attributes (IFD0 / IFD1)
    pub const IMAGE_WIDTH: u16 = 0x0100;
    pub const IMAGE_LENGTH: u16 = 0x0101;
    pub const BITS_PER_SAMPLE: u16 = 0x0102;
    pub const COMPRESSION: u16 = 0x0103;
    pub const PHOTOMETRIC_INTERPRETATION: u16 = 0x0106;
    pub const IMAGE_DESCRIPTION: u16 = 0x010E;
    pub const MAKE: u16 = 0x010F;
    pub const MODEL: u16 = 0x0110;
    pub const STRIP_OFFSETS: u16 = 0x0111;
    pub const ORIENTATION: u16 = 0x0112;
    pub const SAMPLES_PER_PIXEL: u16 = 0x0115;
    pub const ROWS_PER_STRIP: u16 = 0x0116;
    pub const STRIP_BYTE_COUNTS: u16 = 0x0117;
    pub const X_RESOLUTION: u16 = 0x011A;
    pub const Y_RESOLUTION: u16 = 0x011B;
    pub const PLANAR_CONFIGURATION: u16 = 0x011C;
    pub const RESOLUTION_UNIT: u16 = 0x0128;
    pub const SOFTWARE: u16 = 0x0131;
    pub const DATE_TIME: u16 = 0x0132;
    pub const ARTIST: u16 = 0x013B;
    pub const JPEG_INTERCHANGE_FORMAT: u16 = 0x0201;
    pub const JPEG_INTERCHANGE_FORMAT_LENGTH: u16 = 0x0202;
    pub const Y_CB_CR_POSITIONING: u16 = 0x0213;
    pub const COPYRIGHT: u16 = 0x8298;
    pub const EXIF_IFD_POINTER: u16 = 0x8769;
    pub const GPS_IFD_POINTER: u16 = 0x8825;

    // Exif attributes
    pub const EXPOSURE_TIME: u16 = 0x829A;
    pub const F_NUMBER: u16 = 0x829D;
    pub const EXPOSURE_PROGRAM: u16 = 0x8822;
    pub const ISO_SPEED_RATINGS: u16 = 0x8827;
    pub const EXIF_VERSION: u16 = 0x9000;
    pub const DATE_TIME_ORIGINAL: u16 = 0x9003;
    pub const DATE_TIME_DIGITIZED: u16 = 0x9004;
    pub const COMPONENTS_CONFIGURATION: u16 = 0x9101;
    pub const SHUTTER_SPEED_VALUE: u16 = 0x9201;
    pub const APERTURE_VALUE: u16 = 0x9202;
    pub const BRIGHTNESS_VALUE: u16 = 0x9203;
    pub const EXPOSURE_BIAS_VALUE: u16 = 0x9204;
    pub const MAX_APERTURE_VALUE: u16 = 0x9205;
    pub const METERING_MODE: u16 = 0x9207;
    pub const LIGHT_SOURCE: u16 = 0x9208;
    pub const FLASH: u16 = 0x9209;
    pub const FOCAL_LENGTH: u16 = 0x920A;
    pub const MAKER_NOTE: u16 = 0x927C;
    pub const USER_COMMENT: u16 = 0x9286;
    pub const SUB_SEC_TIME: u16 = 0x9290;
    pub const SUB_SEC_TIME_ORIGINAL: u16 = 0x9291;
    pub const SUB_SEC_TIME_DIGITIZED: u16 = 0x9292;
    pub const FLASHPIX_VERSION: u16 = 0xA000;
    pub const COLOR_SPACE: u16 = 0xA001;
    pub const PIXEL_X_DIMENSION: u16 = 0xA002;
    pub const PIXEL_Y_DIMENSION: u16 = 0xA003;
    pub const INTEROPERABILITY_IFD_POINTER: u16 = 0xA005;
    pub const EXPOSURE_MODE: u16 = 0xA402;
    pub const WHITE_BALANCE: u16 = 0xA403;
    pub const DIGITAL_ZOOM_RATIO: u16 = 0xA404;
    pub const FOCAL_LENGTH_IN_35MM_FILM: u16 = 0xA405;
    pub const SCENE_CAPTURE_TYPE: u16 = 0xA406;
    pub const IMAGE_UNIQUE_ID: u16 = 0xA420;

    // GPS attributes
    pub const GPS_VERSION_ID: u16 = 0x0000;
    pub const GPS_LATITUDE_REF: u16 = 0x0001;
    pub const GPS_LATITUDE: u16 = 0x0002;
    pub const GPS_LONGITUDE_REF: u16 = 0x0003;
    pub const GPS_LONGITUDE: u16 = 0x0004;
    pub const GPS_ALTITUDE_REF: u16 = 0x0005;
    pub const GPS_ALTITUDE: u16 = 0x0006;
    pub const GPS_TIME_STAMP: u16 = 0x0007;
    pub const GPS_IMG_DIRECTION_REF: u16 = 0x0010;
    pub const GPS_IMG_DIRECTION: u16 = 0x0011;
    pub const GPS_PROCESSING_METHOD: u16 = 0x001B;
    pub const GPS_DATE_STAMP: u16 = 0x001D;

    // Interoperability attributes
    pub const INTEROPERABILITY_INDEX: u16 = 0x0001;
    pub const INTEROPERABILITY_VERSION: u16 = 0x0002;
}

/// Expected number of components for a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentCount {
    /// Exactly this many components (ASCII counts include the NUL)
    Fixed(usize),
    /// Any non-zero number of components
    Variable,
}

/// Schema entry for one tag id
#[derive(Debug, Clone, Copy)]
pub struct TagDefinition {
    pub id: u16,
    pub name: &'static str,
    pub groups: &'static [IfdGroup],
    pub data_types: &'static [DataType],
    pub count: ComponentCount,
}

const IFD0_IFD1: &[IfdGroup] = &[IfdGroup::Primary, IfdGroup::Thumbnail];
const EXIF: &[IfdGroup] = &[IfdGroup::Exif];
const GPS: &[IfdGroup] = &[IfdGroup::Gps];
const INTEROP: &[IfdGroup] = &[IfdGroup::Interoperability];

const BYTE: &[DataType] = &[DataType::Byte];
const ASCII: &[DataType] = &[DataType::Ascii];
const SHORT: &[DataType] = &[DataType::Short];
const LONG: &[DataType] = &[DataType::Long];
const SHORT_OR_LONG: &[DataType] = &[DataType::Short, DataType::Long];
const RATIONAL: &[DataType] = &[DataType::Rational];
const SRATIONAL: &[DataType] = &[DataType::SRational];
const UNDEFINED: &[DataType] = &[DataType::Undefined];

use ComponentCount::{Fixed, Variable};

macro_rules! definitions {
    ($( ($id:expr, $name:expr, $groups:expr, $types:expr, $count:expr) ),+ $(,)?) => {
        &[$(
            TagDefinition {
                id: $id,
                name: $name,
                groups: $groups,
                data_types: $types,
                count: $count,
            },
        )+]
    };
}

/// Tags that can be built. Structural tags (IFD pointers, thumbnail offsets,
/// strip offsets) are absent; the serializer synthesizes them.
pub static DEFINITIONS: &[TagDefinition] = definitions![
    (tag::IMAGE_WIDTH, "ImageWidth", IFD0_IFD1, SHORT_OR_LONG, Fixed(1)),
    (tag::IMAGE_LENGTH, "ImageLength", IFD0_IFD1, SHORT_OR_LONG, Fixed(1)),
    (tag::BITS_PER_SAMPLE, "BitsPerSample", IFD0_IFD1, SHORT, Fixed(3)),
    (tag::COMPRESSION, "Compression", IFD0_IFD1, SHORT, Fixed(1)),
    (tag::PHOTOMETRIC_INTERPRETATION, "PhotometricInterpretation", IFD0_IFD1, SHORT, Fixed(1)),
    (tag::IMAGE_DESCRIPTION, "ImageDescription", IFD0_IFD1, ASCII, Variable),
    (tag::MAKE, "Make", IFD0_IFD1, ASCII, Variable),
    (tag::MODEL, "Model", IFD0_IFD1, ASCII, Variable),
    (tag::ORIENTATION, "Orientation", IFD0_IFD1, SHORT, Fixed(1)),
    (tag::SAMPLES_PER_PIXEL, "SamplesPerPixel", IFD0_IFD1, SHORT, Fixed(1)),
    (tag::ROWS_PER_STRIP, "RowsPerStrip", IFD0_IFD1, SHORT_OR_LONG, Fixed(1)),
    (tag::X_RESOLUTION, "XResolution", IFD0_IFD1, RATIONAL, Fixed(1)),
    (tag::Y_RESOLUTION, "YResolution", IFD0_IFD1, RATIONAL, Fixed(1)),
    (tag::PLANAR_CONFIGURATION, "PlanarConfiguration", IFD0_IFD1, SHORT, Fixed(1)),
    (tag::RESOLUTION_UNIT, "ResolutionUnit", IFD0_IFD1, SHORT, Fixed(1)),
    (tag::SOFTWARE, "Software", IFD0_IFD1, ASCII, Variable),
    (tag::DATE_TIME, "DateTime", IFD0_IFD1, ASCII, Fixed(20)),
    (tag::ARTIST, "Artist", IFD0_IFD1, ASCII, Variable),
    (tag::Y_CB_CR_POSITIONING, "YCbCrPositioning", IFD0_IFD1, SHORT, Fixed(1)),
    (tag::COPYRIGHT, "Copyright", IFD0_IFD1, ASCII, Variable),
    (tag::EXPOSURE_TIME, "ExposureTime", EXIF, RATIONAL, Fixed(1)),
    (tag::F_NUMBER, "FNumber", EXIF, RATIONAL, Fixed(1)),
    (tag::EXPOSURE_PROGRAM, "ExposureProgram", EXIF, SHORT, Fixed(1)),
    (tag::ISO_SPEED_RATINGS, "ISOSpeedRatings", EXIF, SHORT, Variable),
    (tag::EXIF_VERSION, "ExifVersion", EXIF, UNDEFINED, Fixed(4)),
    (tag::DATE_TIME_ORIGINAL, "DateTimeOriginal", EXIF, ASCII, Fixed(20)),
    (tag::DATE_TIME_DIGITIZED, "DateTimeDigitized", EXIF, ASCII, Fixed(20)),
    (tag::COMPONENTS_CONFIGURATION, "ComponentsConfiguration", EXIF, UNDEFINED, Fixed(4)),
    (tag::SHUTTER_SPEED_VALUE, "ShutterSpeedValue", EXIF, SRATIONAL, Fixed(1)),
    (tag::APERTURE_VALUE, "ApertureValue", EXIF, RATIONAL, Fixed(1)),
    (tag::BRIGHTNESS_VALUE, "BrightnessValue", EXIF, SRATIONAL, Fixed(1)),
    (tag::EXPOSURE_BIAS_VALUE, "ExposureBiasValue", EXIF, SRATIONAL, Fixed(1)),
    (tag::MAX_APERTURE_VALUE, "MaxApertureValue", EXIF, RATIONAL, Fixed(1)),
    (tag::METERING_MODE, "MeteringMode", EXIF, SHORT, Fixed(1)),
    (tag::LIGHT_SOURCE, "LightSource", EXIF, SHORT, Fixed(1)),
    (tag::FLASH, "Flash", EXIF, SHORT, Fixed(1)),
    (tag::FOCAL_LENGTH, "FocalLength", EXIF, RATIONAL, Fixed(1)),
    (tag::MAKER_NOTE, "MakerNote", EXIF, UNDEFINED, Variable),
    (tag::USER_COMMENT, "UserComment", EXIF, UNDEFINED, Variable),
    (tag::SUB_SEC_TIME, "SubSecTime", EXIF, ASCII, Variable),
    (tag::SUB_SEC_TIME_ORIGINAL, "SubSecTimeOriginal", EXIF, ASCII, Variable),
    (tag::SUB_SEC_TIME_DIGITIZED, "SubSecTimeDigitized", EXIF, ASCII, Variable),
    (tag::FLASHPIX_VERSION, "FlashpixVersion", EXIF, UNDEFINED, Fixed(4)),
    (tag::COLOR_SPACE, "ColorSpace", EXIF, SHORT, Fixed(1)),
    (tag::PIXEL_X_DIMENSION, "PixelXDimension", EXIF, SHORT_OR_LONG, Fixed(1)),
    (tag::PIXEL_Y_DIMENSION, "PixelYDimension", EXIF, SHORT_OR_LONG, Fixed(1)),
    (tag::EXPOSURE_MODE, "ExposureMode", EXIF, SHORT, Fixed(1)),
    (tag::WHITE_BALANCE, "WhiteBalance", EXIF, SHORT, Fixed(1)),
    (tag::DIGITAL_ZOOM_RATIO, "DigitalZoomRatio", EXIF, RATIONAL, Fixed(1)),
    (tag::FOCAL_LENGTH_IN_35MM_FILM, "FocalLengthIn35mmFilm", EXIF, SHORT, Fixed(1)),
    (tag::SCENE_CAPTURE_TYPE, "SceneCaptureType", EXIF, SHORT, Fixed(1)),
    (tag::IMAGE_UNIQUE_ID, "ImageUniqueID", EXIF, ASCII, Fixed(33)),
    (tag::GPS_VERSION_ID, "GPSVersionID", GPS, BYTE, Fixed(4)),
    (tag::GPS_LATITUDE_REF, "GPSLatitudeRef", GPS, ASCII, Fixed(2)),
    (tag::GPS_LATITUDE, "GPSLatitude", GPS, RATIONAL, Fixed(3)),
    (tag::GPS_LONGITUDE_REF, "GPSLongitudeRef", GPS, ASCII, Fixed(2)),
    (tag::GPS_LONGITUDE, "GPSLongitude", GPS, RATIONAL, Fixed(3)),
    (tag::GPS_ALTITUDE_REF, "GPSAltitudeRef", GPS, BYTE, Fixed(1)),
    (tag::GPS_ALTITUDE, "GPSAltitude", GPS, RATIONAL, Fixed(1)),
    (tag::GPS_TIME_STAMP, "GPSTimeStamp", GPS, RATIONAL, Fixed(3)),
    (tag::GPS_IMG_DIRECTION_REF, "GPSImgDirectionRef", GPS, ASCII, Fixed(2)),
    (tag::GPS_IMG_DIRECTION, "GPSImgDirection", GPS, RATIONAL, Fixed(1)),
    (tag::GPS_PROCESSING_METHOD, "GPSProcessingMethod", GPS, UNDEFINED, Variable),
    (tag::GPS_DATE_STAMP, "GPSDateStamp", GPS, ASCII, Fixed(11)),
    (tag::INTEROPERABILITY_INDEX, "InteroperabilityIndex", INTEROP, ASCII, Variable),
    (tag::INTEROPERABILITY_VERSION, "InteroperabilityVersion", INTEROP, UNDEFINED, Fixed(4)),
];

/// Find the definition of `id` within `group`
pub fn lookup(id: u16, group: IfdGroup) -> Option<&'static TagDefinition> {
    DEFINITIONS
        .iter()
        .find(|def| def.id == id && def.groups.contains(&group))
}

/// Whether the tag describes the TIFF layout itself rather than image data.
///
/// Structural tags never enter a store on decode and are recomputed on encode.
pub fn is_structural(id: u16, group: IfdGroup) -> bool {
    match group {
        IfdGroup::Primary => matches!(
            id,
            tag::EXIF_IFD_POINTER
                | tag::GPS_IFD_POINTER
                | tag::JPEG_INTERCHANGE_FORMAT
                | tag::JPEG_INTERCHANGE_FORMAT_LENGTH
        ),
        IfdGroup::Exif => id == tag::INTEROPERABILITY_IFD_POINTER,
        IfdGroup::Thumbnail => matches!(
            id,
            tag::EXIF_IFD_POINTER
                | tag::GPS_IFD_POINTER
                | tag::JPEG_INTERCHANGE_FORMAT
                | tag::JPEG_INTERCHANGE_FORMAT_LENGTH
                | tag::STRIP_OFFSETS
                | tag::STRIP_BYTE_COUNTS
        ),
        IfdGroup::Gps | IfdGroup::Interoperability => false,
    }
}
