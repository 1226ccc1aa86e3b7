use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// lockf(3) returned -1 / lockf(3) 返回 -1
  #[error("lockf: {0}")]
  Os(#[source] io::Error),

  #[error("io error: {0}")]
  Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
  /// Build from raw errno / 从原始 errno 构建
  #[inline]
  pub fn from_errno(code: i32) -> Self {
    Self::Os(io::Error::from_raw_os_error(code))
  }

  /// Raw OS error code, always Some for Os
  /// 原始系统错误码，Os 必为 Some
  #[inline]
  pub fn raw_os_error(&self) -> Option<i32> {
    match self {
      Self::Os(e) | Self::Io(e) => e.raw_os_error(),
    }
  }

  #[inline]
  pub fn kind(&self) -> io::ErrorKind {
    match self {
      Self::Os(e) | Self::Io(e) => e.kind(),
    }
  }

  /// Region held by another process / 区域被其他进程持有
  ///
  /// POSIX allows either EAGAIN or EACCES here.
  /// POSIX 允许返回 EAGAIN 或 EACCES。
  #[inline]
  pub fn is_contended(&self) -> bool {
    matches!(self, Self::Os(e) if matches!(e.raw_os_error(), Some(libc::EAGAIN | libc::EACCES)))
  }
}

impl From<Error> for io::Error {
  fn from(err: Error) -> Self {
    match err {
      Error::Os(e) | Error::Io(e) => e,
    }
  }
}
