fn main() {
    attendance_pipeline::cli::run();
}
