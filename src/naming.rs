use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// 由输入路径生成输出路径，例如 `photo.bmp` 得到 `photo-edge.bmp`。
///
/// 在文件名最后一个 `.` 处截断并追加 `suffix`；文件名中没有 `.` 时直接追加。
/// 只处理最后一个路径分隔符之后的部分，目录名中的 `.` 不受影响。
/// 文件名按 `OsStr` 处理，非 UTF-8 的名字原样保留。
pub fn derive_output_path(input: &Path, suffix: &str) -> PathBuf {
    let Some(name) = input.file_name() else {
        let mut whole = input.as_os_str().to_os_string();
        whole.push(suffix);
        return PathBuf::from(whole);
    };

    let stem = match (input.file_stem(), input.extension()) {
        (Some(stem), Some(_)) => stem,
        // file_stem 把 ".hidden" 整体视为主干，这里按最后一个 `.` 截断为空
        _ if name.as_encoded_bytes().starts_with(b".") => OsStr::new(""),
        _ => name,
    };

    let mut file_name = stem.to_os_string();
    file_name.push(suffix);
    input.with_file_name(file_name)
}
