fn main() {
    leduc_cfr::cli::run();
}
