#![cfg_attr(docsrs, feature(doc_cfg))]

//! # lockf - POSIX advisory file locking / POSIX 建议性文件锁
//!
//! Thin, typed pass-through to lockf(3).
//! lockf(3) 的轻量类型化封装。
//!
//! Locks are owned by the process and cover `len` bytes from the current
//! file offset, `0` meaning up to end of file and beyond.
//! 锁归属于进程，覆盖从当前偏移开始的 `len` 字节，`0` 表示直到文件末尾及之后。

pub mod cmd;
pub mod error;
pub mod file;

use std::os::fd::{AsFd, AsRawFd, RawFd};

pub use cmd::{Cmd, F_LOCK, F_TEST, F_TLOCK, F_ULOCK};
pub use error::{Error, Result};
pub use file::LockFile;
use libc::{c_int, off_t};
use nix::errno::Errno;

/// Call lockf(3) / 调用 lockf(3)
///
/// Arguments are passed through unchanged: an unopened `fd` or unknown `cmd`
/// is reported by the OS. Returns the raw result (0) on success.
/// 参数原样传递：未打开的 `fd` 或未知 `cmd` 由系统报错。成功时返回原始结果（0）。
///
/// `F_LOCK` may block until the region is released by its holder.
/// `F_LOCK` 可能阻塞直到持有者释放区域。
pub fn lockf(fd: RawFd, cmd: c_int, len: off_t) -> Result<c_int> {
  Errno::clear();
  // SAFETY: plain integer arguments, no memory is passed to the OS
  // 安全：仅传递整数参数，不涉及内存
  let r = unsafe { libc::lockf(fd, cmd, len) };
  if r == -1 {
    // Read before anything else can clobber it
    // 在被覆盖前立即读取
    let code = Errno::last_raw();
    Errno::clear();
    return Err(Error::from_errno(code));
  }
  Ok(r)
}

/// Typed variant of [`lockf`] / [`lockf`] 的类型化版本
#[inline]
pub fn lockf_fd(fd: impl AsFd, cmd: Cmd, len: off_t) -> Result<c_int> {
  lockf(fd.as_fd().as_raw_fd(), cmd.into(), len)
}
