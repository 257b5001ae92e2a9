fn main() {
    pysqf::cli::run();
}
