//! lockf(3) commands / lockf(3) 命令
//!
//! Values come from the platform headers via libc.
//! 数值来自平台头文件（经 libc）。

use libc::c_int;
pub use libc::{F_LOCK, F_TEST, F_TLOCK, F_ULOCK};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Cmd {
  /// Unlock / 解锁
  ULock = F_ULOCK,
  /// Blocking exclusive lock / 阻塞排他锁
  Lock = F_LOCK,
  /// Non-blocking exclusive lock / 非阻塞排他锁
  TLock = F_TLOCK,
  /// Test for a lock held by another process / 检测其他进程持有的锁
  Test = F_TEST,
}

impl From<Cmd> for c_int {
  #[inline(always)]
  fn from(cmd: Cmd) -> Self {
    cmd as c_int
  }
}

impl TryFrom<c_int> for Cmd {
  /// Unrecognized raw value / 无法识别的原始值
  type Error = c_int;

  fn try_from(raw: c_int) -> Result<Self, c_int> {
    Ok(match raw {
      F_ULOCK => Self::ULock,
      F_LOCK => Self::Lock,
      F_TLOCK => Self::TLock,
      F_TEST => Self::Test,
      _ => return Err(raw),
    })
  }
}
