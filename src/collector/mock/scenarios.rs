//! Pre-built capture trees for testing.
//!
//! The layout mirrors what the capture scripts leave behind: one directory
//! per host with a `top` capture and a `jstack` capture taken at the same
//! instants.

use super::filesystem::MockFs;

/// `top -H -b` capture with two instants.
///
/// At 14:05:01, thread 100 (`0x64`) uses 6.2% and thread 101 (`0x65`) 1.0%.
pub const TOP_CAPTURE: &str = "\
Thu Mar 04 02:05:01 PM UTC 2021
top - 14:05:01 up 10 days,  3:22,  2 users,  load average: 0.52, 0.58, 0.59
Threads:   2 total,   1 running,   1 sleeping,   0 stopped,   0 zombie
%Cpu(s):  6.3 us,  1.2 sy,  0.0 ni, 92.3 id,  0.0 wa,  0.0 hi,  0.2 si,  0.0 st
KiB Mem : 32779828 total,  1198316 free, 20349572 used, 11231940 buff/cache
KiB Swap:        0 total,        0 free,        0 used. 11946316 avail Mem

   PID USER      PR  NI    VIRT    RES    SHR S %CPU %MEM     TIME+ COMMAND
   100 jboss     20   0   14.7g   8.6g  40040 R  6.2  4.4   0:10.02 java
   101 jboss     20   0   14.7g   8.6g  40040 S  1.0  0.5   0:00.40 java

Thu Mar 04 02:05:06 PM UTC 2021
top - 14:05:06 up 10 days,  3:22,  2 users,  load average: 0.60, 0.59, 0.59
Threads:   3 total,   2 running,   1 sleeping,   0 stopped,   0 zombie
%Cpu(s): 12.5 us,  2.0 sy,  0.0 ni, 85.1 id,  0.0 wa,  0.0 hi,  0.4 si,  0.0 st
KiB Mem : 32779828 total,  1170316 free, 20372572 used, 11231940 buff/cache
KiB Swap:        0 total,        0 free,        0 used. 11923316 avail Mem

   PID USER      PR  NI    VIRT    RES    SHR S %CPU %MEM     TIME+ COMMAND
   100 jboss     20   0   14.7g   8.6g  40040 S  0.3  4.4   0:10.03 java
   101 jboss     20   0   14.7g   8.6g  40040 R 12.0  0.5   0:01.00 java
   102 jboss     20   0   14.7g   8.6g  40040 R  3.5  0.2   0:00.20 java
";

/// `jstack` capture taken alongside [`TOP_CAPTURE`].
///
/// Thread 101 has no stack at 14:05:01.
pub const THREADDUMP_CAPTURE: &str = r#"Thu Mar 04 02:05:01 PM UTC 2021
2021-03-04 14:05:01
Full thread dump OpenJDK 64-Bit Server VM (25.282-b08 mixed mode):

"http-worker-1" #21 daemon prio=5 os_prio=0 tid=0x00007f3c nid=0x64 runnable [0x00007f3b]
   java.lang.Thread.State: RUNNABLE
	at com.example.Codec.encode(Codec.java:42)

Thu Mar 04 02:05:06 PM UTC 2021
2021-03-04 14:05:06
Full thread dump OpenJDK 64-Bit Server VM (25.282-b08 mixed mode):

"http-worker-1" #21 daemon prio=5 os_prio=0 tid=0x00007f3c nid=0x64 waiting on condition [0x00007f3b]
   java.lang.Thread.State: WAITING (parking)

"scheduler-2" #22 daemon prio=5 os_prio=0 tid=0x00007f3d nid=0x65 runnable [0x00007f3a]
   java.lang.Thread.State: RUNNABLE
	at com.example.Scheduler.tick(Scheduler.java:77)
	at com.example.Scheduler.run(Scheduler.java:60)

"GC task thread#0 (ParallelGC)" os_prio=0 tid=0x00007f3e nid=0x66 runnable
"#;

impl MockFs {
    /// A single host directory `/data/host-a` with both captures.
    pub fn high_cpu_capture() -> Self {
        let mut fs = Self::new();
        fs.add_file("/data/host-a/high-cpu.out", TOP_CAPTURE);
        fs.add_file("/data/host-a/high-cpu-tdump.out", THREADDUMP_CAPTURE);
        fs
    }

    /// Like [`high_cpu_capture`](Self::high_cpu_capture), but the thread dump
    /// stops after the first instant.
    pub fn truncated_thread_dump() -> Self {
        let mut fs = Self::new();
        let first_dump: String = THREADDUMP_CAPTURE
            .lines()
            .take_while(|line| !line.starts_with("Thu Mar 04 02:05:06"))
            .map(|line| format!("{line}\n"))
            .collect();
        fs.add_file("/data/host-a/high-cpu.out", TOP_CAPTURE);
        fs.add_file("/data/host-a/high-cpu-tdump.out", first_dump);
        fs
    }

    /// Captures of two JVMs on one host, written with a pid suffix.
    pub fn per_pid_captures() -> Self {
        let mut fs = Self::high_cpu_capture();
        fs.add_file("/data/host-a/high-cpu-4242.out", TOP_CAPTURE);
        fs.add_file("/data/host-a/high-cpu-tdump-4242.out", THREADDUMP_CAPTURE);
        fs.add_file("/data/host-a/rerun/high-cpu-4242.out", TOP_CAPTURE);
        fs.add_file("/data/host-a/rerun/high-cpu-tdump-4242.out", THREADDUMP_CAPTURE);
        fs.add_file("/data/host-a/rerun/notes.txt", "captured after restart\n");
        fs
    }
}
