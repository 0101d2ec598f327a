mod repetition_tests;
