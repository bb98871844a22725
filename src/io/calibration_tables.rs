//! Built-in band calibration tables
//!
//! Hyperion: EO-1 Hyperion L1 calibrated bands (VNIR B008-B057, SWIR
//! B077-B224), centre wavelength and FWHM in nm.
//! WorldView-3: "Radiometric Use of WorldView-3 Imagery" v2, centre
//! wavelength and effective bandwidth in nm.

use crate::io::band_table::DynamicRange;

pub(crate) const HYPERION_BANDS: &[(&str, f64, f64, DynamicRange)] = &[
    ("B008", 426.82, 11.3871, DynamicRange::Vnir),
    ("B009", 436.99, 11.3892, DynamicRange::Vnir),
    ("B010", 447.17, 11.3913, DynamicRange::Vnir),
    ("B011", 457.34, 11.3934, DynamicRange::Vnir),
    ("B012", 467.52, 11.3955, DynamicRange::Vnir),
    ("B013", 477.69, 11.3976, DynamicRange::Vnir),
    ("B014", 487.87, 11.3997, DynamicRange::Vnir),
    ("B015", 498.04, 11.4018, DynamicRange::Vnir),
    ("B016", 508.22, 11.4039, DynamicRange::Vnir),
    ("B017", 518.39, 11.4060, DynamicRange::Vnir),
    ("B018", 528.57, 11.4081, DynamicRange::Vnir),
    ("B019", 538.74, 11.4102, DynamicRange::Vnir),
    ("B020", 548.92, 11.4123, DynamicRange::Vnir),
    ("B021", 559.09, 11.4144, DynamicRange::Vnir),
    ("B022", 569.27, 11.4165, DynamicRange::Vnir),
    ("B023", 579.44, 11.4186, DynamicRange::Vnir),
    ("B024", 589.62, 11.4207, DynamicRange::Vnir),
    ("B025", 599.79, 11.4228, DynamicRange::Vnir),
    ("B026", 609.97, 11.4249, DynamicRange::Vnir),
    ("B027", 620.15, 11.4270, DynamicRange::Vnir),
    ("B028", 630.32, 11.4291, DynamicRange::Vnir),
    ("B029", 640.50, 11.4312, DynamicRange::Vnir),
    ("B030", 650.67, 11.4333, DynamicRange::Vnir),
    ("B031", 660.85, 11.4354, DynamicRange::Vnir),
    ("B032", 671.02, 11.4375, DynamicRange::Vnir),
    ("B033", 681.20, 11.4396, DynamicRange::Vnir),
    ("B034", 691.37, 11.4417, DynamicRange::Vnir),
    ("B035", 701.55, 11.4438, DynamicRange::Vnir),
    ("B036", 711.72, 11.4459, DynamicRange::Vnir),
    ("B037", 721.90, 11.4480, DynamicRange::Vnir),
    ("B038", 732.07, 11.4501, DynamicRange::Vnir),
    ("B039", 742.25, 11.4522, DynamicRange::Vnir),
    ("B040", 752.42, 11.4543, DynamicRange::Vnir),
    ("B041", 762.60, 11.4564, DynamicRange::Vnir),
    ("B042", 772.77, 11.4585, DynamicRange::Vnir),
    ("B043", 782.95, 11.4606, DynamicRange::Vnir),
    ("B044", 793.12, 11.4627, DynamicRange::Vnir),
    ("B045", 803.30, 11.4648, DynamicRange::Vnir),
    ("B046", 813.47, 11.4669, DynamicRange::Vnir),
    ("B047", 823.65, 11.4690, DynamicRange::Vnir),
    ("B048", 833.82, 11.4711, DynamicRange::Vnir),
    ("B049", 844.00, 11.4732, DynamicRange::Vnir),
    ("B050", 854.17, 11.4753, DynamicRange::Vnir),
    ("B051", 864.35, 11.4774, DynamicRange::Vnir),
    ("B052", 874.53, 11.4795, DynamicRange::Vnir),
    ("B053", 884.70, 11.4816, DynamicRange::Vnir),
    ("B054", 894.88, 11.4837, DynamicRange::Vnir),
    ("B055", 905.05, 11.4858, DynamicRange::Vnir),
    ("B056", 915.23, 11.4879, DynamicRange::Vnir),
    ("B057", 925.40, 11.4900, DynamicRange::Vnir),
    ("B077", 912.46, 10.8964, DynamicRange::Swir),
    ("B078", 922.55, 10.8976, DynamicRange::Swir),
    ("B079", 932.64, 10.8988, DynamicRange::Swir),
    ("B080", 942.73, 10.9000, DynamicRange::Swir),
    ("B081", 952.82, 10.9012, DynamicRange::Swir),
    ("B082", 962.91, 10.9024, DynamicRange::Swir),
    ("B083", 973.00, 10.9036, DynamicRange::Swir),
    ("B084", 983.09, 10.9048, DynamicRange::Swir),
    ("B085", 993.18, 10.9060, DynamicRange::Swir),
    ("B086", 1003.27, 10.9072, DynamicRange::Swir),
    ("B087", 1013.36, 10.9084, DynamicRange::Swir),
    ("B088", 1023.45, 10.9096, DynamicRange::Swir),
    ("B089", 1033.54, 10.9108, DynamicRange::Swir),
    ("B090", 1043.63, 10.9120, DynamicRange::Swir),
    ("B091", 1053.72, 10.9132, DynamicRange::Swir),
    ("B092", 1063.81, 10.9144, DynamicRange::Swir),
    ("B093", 1073.90, 10.9156, DynamicRange::Swir),
    ("B094", 1083.99, 10.9168, DynamicRange::Swir),
    ("B095", 1094.08, 10.9180, DynamicRange::Swir),
    ("B096", 1104.17, 10.9192, DynamicRange::Swir),
    ("B097", 1114.26, 10.9204, DynamicRange::Swir),
    ("B098", 1124.35, 10.9216, DynamicRange::Swir),
    ("B099", 1134.44, 10.9228, DynamicRange::Swir),
    ("B100", 1144.53, 10.9240, DynamicRange::Swir),
    ("B101", 1154.62, 10.9252, DynamicRange::Swir),
    ("B102", 1164.71, 10.9264, DynamicRange::Swir),
    ("B103", 1174.80, 10.9276, DynamicRange::Swir),
    ("B104", 1184.89, 10.9288, DynamicRange::Swir),
    ("B105", 1194.98, 10.9300, DynamicRange::Swir),
    ("B106", 1205.07, 10.9312, DynamicRange::Swir),
    ("B107", 1215.16, 10.9324, DynamicRange::Swir),
    ("B108", 1225.25, 10.9336, DynamicRange::Swir),
    ("B109", 1235.34, 10.9348, DynamicRange::Swir),
    ("B110", 1245.43, 10.9360, DynamicRange::Swir),
    ("B111", 1255.52, 10.9372, DynamicRange::Swir),
    ("B112", 1265.61, 10.9384, DynamicRange::Swir),
    ("B113", 1275.70, 10.9396, DynamicRange::Swir),
    ("B114", 1285.79, 10.9408, DynamicRange::Swir),
    ("B115", 1295.88, 10.9420, DynamicRange::Swir),
    ("B116", 1305.97, 10.9432, DynamicRange::Swir),
    ("B117", 1316.06, 10.9444, DynamicRange::Swir),
    ("B118", 1326.15, 10.9456, DynamicRange::Swir),
    ("B119", 1336.24, 10.9468, DynamicRange::Swir),
    ("B120", 1346.33, 10.9480, DynamicRange::Swir),
    ("B121", 1356.41, 10.9492, DynamicRange::Swir),
    ("B122", 1366.50, 10.9504, DynamicRange::Swir),
    ("B123", 1376.59, 10.9516, DynamicRange::Swir),
    ("B124", 1386.68, 10.9528, DynamicRange::Swir),
    ("B125", 1396.77, 10.9540, DynamicRange::Swir),
    ("B126", 1406.86, 10.9552, DynamicRange::Swir),
    ("B127", 1416.95, 10.9564, DynamicRange::Swir),
    ("B128", 1427.04, 10.9576, DynamicRange::Swir),
    ("B129", 1437.13, 10.9588, DynamicRange::Swir),
    ("B130", 1447.22, 10.9600, DynamicRange::Swir),
    ("B131", 1457.31, 10.9612, DynamicRange::Swir),
    ("B132", 1467.40, 10.9624, DynamicRange::Swir),
    ("B133", 1477.49, 10.9636, DynamicRange::Swir),
    ("B134", 1487.58, 10.9648, DynamicRange::Swir),
    ("B135", 1497.67, 10.9660, DynamicRange::Swir),
    ("B136", 1507.76, 10.9672, DynamicRange::Swir),
    ("B137", 1517.85, 10.9684, DynamicRange::Swir),
    ("B138", 1527.94, 10.9696, DynamicRange::Swir),
    ("B139", 1538.03, 10.9708, DynamicRange::Swir),
    ("B140", 1548.12, 10.9720, DynamicRange::Swir),
    ("B141", 1558.21, 10.9732, DynamicRange::Swir),
    ("B142", 1568.30, 10.9744, DynamicRange::Swir),
    ("B143", 1578.39, 10.9756, DynamicRange::Swir),
    ("B144", 1588.48, 10.9768, DynamicRange::Swir),
    ("B145", 1598.57, 10.9780, DynamicRange::Swir),
    ("B146", 1608.66, 10.9792, DynamicRange::Swir),
    ("B147", 1618.75, 10.9804, DynamicRange::Swir),
    ("B148", 1628.84, 10.9816, DynamicRange::Swir),
    ("B149", 1638.93, 10.9828, DynamicRange::Swir),
    ("B150", 1649.02, 10.9840, DynamicRange::Swir),
    ("B151", 1659.11, 10.9852, DynamicRange::Swir),
    ("B152", 1669.20, 10.9864, DynamicRange::Swir),
    ("B153", 1679.29, 10.9876, DynamicRange::Swir),
    ("B154", 1689.38, 10.9888, DynamicRange::Swir),
    ("B155", 1699.47, 10.9900, DynamicRange::Swir),
    ("B156", 1709.56, 10.9912, DynamicRange::Swir),
    ("B157", 1719.65, 10.9924, DynamicRange::Swir),
    ("B158", 1729.74, 10.9936, DynamicRange::Swir),
    ("B159", 1739.83, 10.9948, DynamicRange::Swir),
    ("B160", 1749.92, 10.9960, DynamicRange::Swir),
    ("B161", 1760.01, 10.9972, DynamicRange::Swir),
    ("B162", 1770.10, 10.9984, DynamicRange::Swir),
    ("B163", 1780.19, 10.9996, DynamicRange::Swir),
    ("B164", 1790.28, 11.0008, DynamicRange::Swir),
    ("B165", 1800.37, 11.0020, DynamicRange::Swir),
    ("B166", 1810.46, 11.0032, DynamicRange::Swir),
    ("B167", 1820.55, 11.0044, DynamicRange::Swir),
    ("B168", 1830.64, 11.0056, DynamicRange::Swir),
    ("B169", 1840.73, 11.0068, DynamicRange::Swir),
    ("B170", 1850.82, 11.0080, DynamicRange::Swir),
    ("B171", 1860.91, 11.0092, DynamicRange::Swir),
    ("B172", 1871.00, 11.0104, DynamicRange::Swir),
    ("B173", 1881.09, 11.0116, DynamicRange::Swir),
    ("B174", 1891.18, 11.0128, DynamicRange::Swir),
    ("B175", 1901.27, 11.0140, DynamicRange::Swir),
    ("B176", 1911.36, 11.0152, DynamicRange::Swir),
    ("B177", 1921.45, 11.0164, DynamicRange::Swir),
    ("B178", 1931.54, 11.0176, DynamicRange::Swir),
    ("B179", 1941.63, 11.0188, DynamicRange::Swir),
    ("B180", 1951.72, 11.0200, DynamicRange::Swir),
    ("B181", 1961.81, 11.0212, DynamicRange::Swir),
    ("B182", 1971.90, 11.0224, DynamicRange::Swir),
    ("B183", 1981.99, 11.0236, DynamicRange::Swir),
    ("B184", 1992.08, 11.0248, DynamicRange::Swir),
    ("B185", 2002.17, 11.0260, DynamicRange::Swir),
    ("B186", 2012.26, 11.0272, DynamicRange::Swir),
    ("B187", 2022.35, 11.0284, DynamicRange::Swir),
    ("B188", 2032.44, 11.0296, DynamicRange::Swir),
    ("B189", 2042.53, 11.0308, DynamicRange::Swir),
    ("B190", 2052.62, 11.0320, DynamicRange::Swir),
    ("B191", 2062.71, 11.0332, DynamicRange::Swir),
    ("B192", 2072.80, 11.0344, DynamicRange::Swir),
    ("B193", 2082.89, 11.0356, DynamicRange::Swir),
    ("B194", 2092.98, 11.0368, DynamicRange::Swir),
    ("B195", 2103.07, 11.0380, DynamicRange::Swir),
    ("B196", 2113.16, 11.0392, DynamicRange::Swir),
    ("B197", 2123.25, 11.0404, DynamicRange::Swir),
    ("B198", 2133.34, 11.0416, DynamicRange::Swir),
    ("B199", 2143.43, 11.0428, DynamicRange::Swir),
    ("B200", 2153.52, 11.0440, DynamicRange::Swir),
    ("B201", 2163.61, 11.0452, DynamicRange::Swir),
    ("B202", 2173.70, 11.0464, DynamicRange::Swir),
    ("B203", 2183.79, 11.0476, DynamicRange::Swir),
    ("B204", 2193.88, 11.0488, DynamicRange::Swir),
    ("B205", 2203.97, 11.0500, DynamicRange::Swir),
    ("B206", 2214.06, 11.0512, DynamicRange::Swir),
    ("B207", 2224.15, 11.0524, DynamicRange::Swir),
    ("B208", 2234.24, 11.0536, DynamicRange::Swir),
    ("B209", 2244.33, 11.0548, DynamicRange::Swir),
    ("B210", 2254.42, 11.0560, DynamicRange::Swir),
    ("B211", 2264.51, 11.0572, DynamicRange::Swir),
    ("B212", 2274.60, 11.0584, DynamicRange::Swir),
    ("B213", 2284.69, 11.0596, DynamicRange::Swir),
    ("B214", 2294.78, 11.0608, DynamicRange::Swir),
    ("B215", 2304.87, 11.0620, DynamicRange::Swir),
    ("B216", 2314.96, 11.0632, DynamicRange::Swir),
    ("B217", 2325.05, 11.0644, DynamicRange::Swir),
    ("B218", 2335.14, 11.0656, DynamicRange::Swir),
    ("B219", 2345.23, 11.0668, DynamicRange::Swir),
    ("B220", 2355.32, 11.0680, DynamicRange::Swir),
    ("B221", 2365.41, 11.0692, DynamicRange::Swir),
    ("B222", 2375.49, 11.0704, DynamicRange::Swir),
    ("B223", 2385.58, 11.0716, DynamicRange::Swir),
    ("B224", 2395.67, 11.0728, DynamicRange::Swir),
];

/// WorldView-3 bands in the numbering used by its image description tag:
/// PAN, 8 VNIR, 8 SWIR
pub(crate) const WORLDVIEW3_BANDS: &[(&str, f64, f64)] = &[
    ("B001", 649.4, 289.6),
    ("B002", 427.4, 40.5),
    ("B003", 481.9, 54.0),
    ("B004", 547.1, 61.8),
    ("B005", 604.3, 38.1),
    ("B006", 660.1, 58.5),
    ("B007", 722.7, 38.7),
    ("B008", 824.0, 100.4),
    ("B009", 913.6, 88.9),
    ("B010", 1209.1, 33.0),
    ("B011", 1571.6, 40.0),
    ("B012", 1661.1, 42.0),
    ("B013", 1729.5, 40.0),
    ("B014", 2163.7, 41.0),
    ("B015", 2202.2, 47.0),
    ("B016", 2259.3, 69.1),
    ("B017", 2329.2, 66.9),
];
