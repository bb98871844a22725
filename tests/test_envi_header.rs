use envi_convert::{ByteOrder, DataType, Dimensions, EnviMetadata, Interleave, Sensor};

fn three_band_header() -> EnviMetadata {
    EnviMetadata::builder()
        .dimensions(Dimensions::new(3, 2, 2))
        .interleave(Interleave::Bip)
        .byte_order(ByteOrder::Lsf)
        .data_type(DataType::Float32)
        .wavelength(vec![400.0, 500.0, 600.0])
        .fwhm(vec![10.0, 10.0, 10.0])
        .wavelength_units("nm")
        .sensor(Sensor::WorldView3)
        .build()
        .expect("Failed to build metadata")
}

#[test]
fn test_three_band_header() {
    let header = three_band_header().to_header_string();
    let lines: Vec<&str> = header.lines().collect();

    assert_eq!(lines[0], "ENVI");
    assert!(lines.contains(&"wavelength = { 400.0, 500.0, 600.0 }"));
    assert!(lines.contains(&"fwhm = { 10.0, 10.0, 10.0 }"));
    assert!(lines.contains(&"interleave = bip"));
    assert!(lines.contains(&"byte order = 0"));
    assert!(lines.contains(&"data type = 4"));
    assert!(lines.contains(&"sensor type = WorldView-3"));
    assert!(header.ends_with('\n'));
}

#[test]
fn test_field_order_is_fixed() {
    let header = three_band_header().to_header_string();
    let keys: Vec<&str> = header
        .lines()
        .skip(1)
        .map(|line| line.split(" = ").next().unwrap_or_default())
        .collect();

    assert_eq!(
        keys,
        vec![
            "byte order",
            "data type",
            "header offset",
            "file type",
            "interleave",
            "bands",
            "lines",
            "samples",
            "coordinate system string",
            "data ignore value",
            "fwhm",
            "map info",
            "sensor type",
            "wavelength",
            "wavelength units",
        ]
    );
}

#[test]
fn test_interleave_change_touches_only_interleave() {
    let bip = three_band_header();
    let bsq = bip.with_interleave(Interleave::Bsq);

    assert_eq!(bsq.interleave(), Interleave::Bsq);
    assert_eq!(bip.interleave(), Interleave::Bip);
    assert_eq!(bsq.with_interleave(Interleave::Bip), bip);

    let bip_text = bip.to_header_string();
    let bsq_text = bsq.to_header_string();
    let changed: Vec<(&str, &str)> = bip_text
        .lines()
        .zip(bsq_text.lines())
        .filter(|(a, b)| a != b)
        .collect();
    assert_eq!(changed, vec![("interleave = bip", "interleave = bsq")]);
}

#[test]
fn test_band_count_mismatch_is_reported_not_raised() {
    let metadata = EnviMetadata::builder()
        .dimensions(Dimensions::new(3, 2, 2))
        .wavelength(vec![400.0, 500.0])
        .fwhm(vec![10.0, 10.0, 10.0])
        .build()
        .expect("mismatch must not prevent building");

    let issues = metadata.report_band_count_issues();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, "wavelength");
    assert!(metadata.to_header_string().contains("bands = 3\n"));
}
