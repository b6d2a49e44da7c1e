/// BMP 文件头 (BITMAPFILEHEADER) 的大小 (字节)。
pub const FILE_HEADER_SIZE: usize = 14;

/// BMP 文件头与信息头 (BITMAPINFOHEADER) 的总大小 (字节)。
/// 像素数据紧跟在这 54 个字节之后。
pub const BMP_HEADER_SIZE: usize = 54;

/// 每个像素占用的字节数 (24 位: 蓝、绿、红)。
pub const BYTES_PER_PIXEL: usize = 3;

/// 每一行像素数据需要对齐到的字节数。
pub const ROW_ALIGNMENT: usize = 4;

/// 唯一支持的位深度。
pub const SUPPORTED_BITS_PER_PIXEL: u16 = 24;

/// 边缘检测使用的 3x3 卷积核 (拉普拉斯算子)，系数之和为 0。
pub const EDGE_KERNEL: [[i32; 3]; 3] = [[0, -1, 0], [-1, 4, -1], [0, -1, 0]];

/// 高斯噪声标准差允许的最小值。
pub const STDDEV_MIN: f64 = 5.0;

/// 高斯噪声标准差允许的最大值。
pub const STDDEV_MAX: f64 = 20.0;

/// 标准差超出范围时使用的替代值。
pub const STDDEV_FALLBACK: f64 = 5.0;

pub const EDGE_SUFFIX: &str = "-edge.bmp";
pub const NOISE_SUFFIX: &str = "-noise.bmp";
