//! 跨平台路径与标准输入检查工具 (传统原则：常识性接口设计)

use crate::error::{EnvError, Result};
use std::path::Path;

/// 校验文件路径：必须存在且不是目录
pub fn validate_file(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(EnvError::InvalidArgument(
            "file path was empty or not provided".to_string(),
        ));
    }

    let metadata = std::fs::metadata(path).map_err(|source| EnvError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    if metadata.is_dir() {
        return Err(EnvError::NotAFile(path.to_path_buf()));
    }

    Ok(())
}

/// 校验目录路径：必须存在且是目录
pub fn validate_dir(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(EnvError::InvalidArgument(
            "directory path was empty or not provided".to_string(),
        ));
    }

    let metadata = std::fs::metadata(path).map_err(|e| EnvError::InvalidDirectory {
        path: path.to_path_buf(),
        reason: format!("cannot access directory: {}", e),
    })?;

    if !metadata.is_dir() {
        return Err(EnvError::InvalidDirectory {
            path: path.to_path_buf(),
            reason: "path is a file".to_string(),
        });
    }

    Ok(())
}

/// 标准输入是否来自管道或文件（而不是字符设备）
///
/// 终端、`/dev/null` 等字符设备返回 `false`，调用方据此跳过读取而不会阻塞。
#[cfg(unix)]
pub fn stdin_is_piped() -> Result<bool> {
    use std::os::fd::AsFd;
    use std::os::unix::fs::FileTypeExt;

    let stdin = std::io::stdin();
    let fd = stdin
        .as_fd()
        .try_clone_to_owned()
        .map_err(|e| EnvError::io("cannot read from stdin", e))?;
    let metadata = std::fs::File::from(fd)
        .metadata()
        .map_err(|e| EnvError::io("cannot read from stdin", e))?;

    Ok(!metadata.file_type().is_char_device())
}

/// 非 Unix 平台没有字符设备的概念，以是否为终端判断
#[cfg(not(unix))]
pub fn stdin_is_piped() -> Result<bool> {
    use std::io::IsTerminal;

    Ok(!std::io::stdin().is_terminal())
}
