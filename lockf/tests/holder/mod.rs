//! Forked lock holders for cross-process tests
//! 跨进程测试用的子进程锁持有者
//!
//! Children only make async-signal-safe calls, then `_exit`.
//! 子进程只调用异步信号安全函数，然后 `_exit`。

#![allow(dead_code)]

use std::os::fd::RawFd;

use libc::{c_int, off_t, pid_t};

fn pipe() -> [c_int; 2] {
  let mut fds = [0 as c_int; 2];
  assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0, "pipe");
  fds
}

fn read_byte(fd: c_int) -> u8 {
  let mut b = 0u8;
  unsafe { libc::read(fd, (&mut b as *mut u8).cast(), 1) };
  b
}

fn write_byte(fd: c_int, b: u8) {
  unsafe { libc::write(fd, (&b as *const u8).cast(), 1) };
}

fn wait(pid: pid_t) -> c_int {
  let mut status = 0;
  unsafe { libc::waitpid(pid, &mut status, 0) };
  libc::WEXITSTATUS(status)
}

/// Child process holding F_TLOCK until dropped
/// 持有 F_TLOCK 直到被 drop 的子进程
pub struct Holder {
  pid: pid_t,
  release: c_int,
}

impl Holder {
  pub fn spawn(fd: RawFd, len: off_t) -> Self {
    let ready = pipe();
    let release = pipe();
    let pid = unsafe { libc::fork() };
    assert!(pid >= 0, "fork");
    if pid == 0 {
      unsafe {
        let r = libc::lockf(fd, libc::F_TLOCK, len);
        write_byte(ready[1], (r == 0) as u8);
        // Explicit byte, not EOF: sibling children inherit our pipe ends
        // 显式字节而非 EOF：兄弟子进程会继承管道端
        read_byte(release[0]);
        libc::_exit(0);
      }
    }
    unsafe {
      libc::close(ready[1]);
      libc::close(release[0]);
    }
    let holder = Self {
      pid,
      release: release[1],
    };
    let ok = read_byte(ready[0]);
    unsafe { libc::close(ready[0]) };
    assert_eq!(ok, 1, "child failed to lock");
    holder
  }
}

impl Drop for Holder {
  fn drop(&mut self) {
    write_byte(self.release, 1);
    unsafe { libc::close(self.release) };
    wait(self.pid);
  }
}

/// Run lockf(3) in a child at `offset`, return its errno (0 on success)
/// 在子进程中从 `offset` 调用 lockf(3)，返回 errno（成功为 0）
///
/// Moves the shared file offset; callers seek back when it matters.
/// 会移动共享文件偏移，需要时调用方自行复位。
pub fn probe_at(fd: RawFd, offset: off_t, cmd: c_int, len: off_t) -> c_int {
  let pid = unsafe { libc::fork() };
  assert!(pid >= 0, "fork");
  if pid == 0 {
    unsafe {
      libc::lseek(fd, offset, libc::SEEK_SET);
      let code = if libc::lockf(fd, cmd, len) == 0 {
        0
      } else {
        std::io::Error::last_os_error().raw_os_error().unwrap_or(255)
      };
      libc::_exit(code);
    }
  }
  wait(pid)
}

pub fn probe(fd: RawFd, cmd: c_int, len: off_t) -> c_int {
  probe_at(fd, 0, cmd, len)
}

pub fn is_contended(code: c_int) -> bool {
  code == libc::EAGAIN || code == libc::EACCES
}
