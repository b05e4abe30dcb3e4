mod print_opcodes_between_two_files;
