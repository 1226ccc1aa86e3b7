//! Lock handle / 锁句柄
//!
//! Pairs a file with a region length. Every method is a single lockf(3)
//! call: no retry, no release on drop.
//! 文件与区域长度的组合。每个方法只调用一次 lockf(3)：不重试，Drop 时不释放。

use std::{
  fs,
  os::fd::{AsFd, AsRawFd},
  path::Path,
};

use libc::{c_int, off_t};
use log::trace;

use crate::{Cmd, Result, lockf_fd};

#[derive(Debug)]
pub struct LockFile<F: AsFd = fs::File> {
  file: F,
  len: off_t,
}

impl LockFile {
  /// Open existing file read/write / 以读写方式打开已有文件
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let file = fs::OpenOptions::new()
      .read(true)
      .write(true)
      .open(path)?;
    Ok(Self::new(file))
  }

  /// Backed by an unlinked temp file / 基于已删除链接的临时文件
  pub fn temporary() -> Result<Self> {
    Ok(Self::new(tempfile::tempfile()?))
  }

  pub fn temporary_in(dir: impl AsRef<Path>) -> Result<Self> {
    Ok(Self::new(tempfile::tempfile_in(dir)?))
  }
}

impl<F: AsFd> LockFile<F> {
  /// Whole file (len 0) / 整个文件（长度 0）
  #[inline]
  pub fn new(file: F) -> Self {
    Self::with_len(file, 0)
  }

  #[inline]
  pub fn with_len(file: F, len: off_t) -> Self {
    Self { file, len }
  }

  #[inline(always)]
  fn call(&self, cmd: Cmd) -> Result<c_int> {
    lockf_fd(&self.file, cmd, self.len)
  }

  /// Acquire, blocking / 阻塞获取
  pub fn lock(&self) -> Result<c_int> {
    let r = self.call(Cmd::Lock)?;
    trace!("lockf fd {} locked len {}", self.fd(), self.len);
    Ok(r)
  }

  /// Acquire, non-blocking / 非阻塞获取
  pub fn try_lock(&self) -> Result<c_int> {
    let r = self.call(Cmd::TLock)?;
    trace!("lockf fd {} try locked len {}", self.fd(), self.len);
    Ok(r)
  }

  /// Release / 释放
  pub fn unlock(&self) -> Result<c_int> {
    let r = self.call(Cmd::ULock)?;
    trace!("lockf fd {} unlocked len {}", self.fd(), self.len);
    Ok(r)
  }

  /// Held by another process / 是否被其他进程持有
  ///
  /// Own locks never count.
  /// 本进程的锁不计入。
  pub fn is_locked(&self) -> Result<bool> {
    match self.call(Cmd::Test) {
      Ok(_) => Ok(false),
      Err(e) if e.is_contended() => Ok(true),
      Err(e) => Err(e),
    }
  }

  #[inline]
  pub fn file(&self) -> &F {
    &self.file
  }

  /// Region length in bytes / 区域字节长度
  #[inline]
  pub fn region_len(&self) -> off_t {
    self.len
  }

  pub fn into_inner(self) -> F {
    self.file
  }

  #[inline(always)]
  fn fd(&self) -> c_int {
    self.file.as_fd().as_raw_fd()
  }
}
